//! Tab labels - единственный источник правды для заголовков табов.

/// Sidebar group: (id, label, icon, [(tab key, icon)])
pub struct NavGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

pub const NAV_GROUPS: &[NavGroup] = &[
    NavGroup {
        id: "hr",
        label: "HR",
        icon: "users",
        items: &[
            ("h101_appraisal_cycle", "calendar"),
            ("h102_meeting", "clock"),
            ("h103_job_application", "briefcase"),
        ],
    },
    NavGroup {
        id: "crm",
        label: "CRM",
        icon: "target",
        items: &[
            ("c201_lead", "target"),
            ("c202_contract", "file-text"),
            ("c203_campaign", "megaphone"),
        ],
    },
    NavGroup {
        id: "settings",
        label: "Settings",
        icon: "settings",
        items: &[("c204_lead_status", "tag")],
    },
];

/// Возвращает читаемый заголовок таба для данного ключа. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> &str {
    match key {
        "h101_appraisal_cycle" => "Appraisal cycles",
        "h102_meeting" => "Meetings",
        "h103_job_application" => "Job applications",
        "c201_lead" => "Leads",
        "c202_contract" => "Contracts",
        "c203_campaign" => "Campaigns",
        "c204_lead_status" => "Lead statuses",
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_nav_item_has_a_label() {
        for group in NAV_GROUPS {
            for (key, _) in group.items {
                assert_ne!(tab_label_for_key(key), *key, "missing label for {key}");
            }
        }
        assert_eq!(tab_label_for_key("x_unknown"), "x_unknown");
    }
}
