use super::domain::ModuleCategory;

/// Identifier prefixes that decide a category on their own, in priority order.
pub const CATEGORY_PREFIXES: &[(&str, ModuleCategory)] = &[
    ("t.BA.WM.", ModuleCategory::Subject),
    ("t.BA.WVK.", ModuleCategory::Context),
    ("t.BA.XXK.", ModuleCategory::Context),
    ("t.BA.WU.", ModuleCategory::Interdisciplinary),
];

/// Prefix shared by subject and context modules; the group tag decides.
pub const SHARED_PREFIX: &str = "t.BA.WV.";

/// Group markers resolving the shared prefix.
pub const GROUP_MARKERS: &[(&str, ModuleCategory)] = &[
    ("IT6", ModuleCategory::Subject),
    ("IT5", ModuleCategory::Context),
];

/// Map a module to its quota category. `None` means the module counts towards no quota.
pub fn classify(module_id: &str, group: &str) -> Option<ModuleCategory> {
    if let Some((_, category)) = CATEGORY_PREFIXES
        .iter()
        .find(|(prefix, _)| module_id.starts_with(prefix))
    {
        return Some(*category);
    }

    if module_id.starts_with(SHARED_PREFIX) {
        return GROUP_MARKERS
            .iter()
            .find(|(marker, _)| group.contains(marker))
            .map(|(_, category)| *category);
    }

    None
}
