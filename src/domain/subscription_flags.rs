/// The six subscription categories, in the order they appear in every
/// generated email.
const CATEGORY_LABELS: [(&str, fn(&SubscriptionFlags) -> bool); 6] = [
    ("Daily Newsletter", |flags| flags.daily_newsletter),
    ("Advertising Updates", |flags| flags.advertising_updates),
    ("Week in Review", |flags| flags.weekin_review),
    ("Event Updates", |flags| flags.event_updates),
    ("Startup Weekly", |flags| flags.startup_weekly),
    ("Podcasts", |flags| flags.podcasts),
];

/// The subscription choices of a single subscriber.
///
/// Fields missing from a request body deserialize to false, so a client may
/// send only the categories it cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionFlags {
    pub daily_newsletter: bool,
    pub advertising_updates: bool,
    pub weekin_review: bool,
    pub event_updates: bool,
    pub startup_weekly: bool,
    pub podcasts: bool,
}

impl SubscriptionFlags {
    /// Labels of the selected categories, in fixed order.
    pub fn selected_labels(&self) -> Vec<&'static str> {
        CATEGORY_LABELS
            .iter()
            .filter(|(_, is_selected)| is_selected(self))
            .map(|(label, _)| *label)
            .collect()
    }

    pub fn any_selected(&self) -> bool {
        !self.selected_labels().is_empty()
    }
}
