//! Tab strip state.

#[derive(Debug, Clone)]
struct Tab {
    id: String,
    active: bool,
}

/// A set of tabs with at most one active.
#[derive(Debug, Clone, Default)]
pub struct TabSet {
    tabs: Vec<Tab>,
}

impl TabSet {
    /// Create a tab set with nothing active.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tabs: ids
                .into_iter()
                .map(|id| Tab {
                    id: id.into(),
                    active: false,
                })
                .collect(),
        }
    }

    /// Id of the content panel that belongs to tab `id`.
    pub fn content_id(id: &str) -> String {
        format!("{id}-content")
    }

    /// Deactivate every tab, then activate the first tab named `id`.
    ///
    /// Returns whether a tab was activated.
    pub fn switch(&mut self, id: &str) -> bool {
        let mut found = false;
        for tab in &mut self.tabs {
            tab.active = !found && tab.id == id;
            found |= tab.active;
        }
        found
    }

    /// Active tab id.
    pub fn active(&self) -> Option<&str> {
        self.tabs.iter().find(|t| t.active).map(|t| t.id.as_str())
    }

    /// Content id of the active tab.
    pub fn active_content(&self) -> Option<String> {
        self.active().map(Self::content_id)
    }

    /// All tab ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.id.as_str())
    }
}
