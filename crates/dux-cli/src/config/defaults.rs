pub fn default_embed_special_actions() -> bool {
    true
}

pub fn default_group_by_modules() -> bool {
    true
}

pub fn default_prettify_names() -> bool {
    true
}
