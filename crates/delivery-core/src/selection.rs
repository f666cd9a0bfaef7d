/// Model behind the dual-list file selector: all offered items on one side,
/// the highlighted subset on the other. The selected list keeps item order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSelection {
    items: Vec<String>,
    selected: Vec<String>,
}

impl FileSelection {
    /// Replaces the offered items and clears the selection.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected.clear();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|entry| entry == name)
    }

    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| !self.is_selected(item))
            .map(String::as_str)
    }

    pub fn select(&mut self, name: &str) -> bool {
        if self.is_selected(name) || !self.items.iter().any(|item| item == name) {
            return false;
        }
        self.selected.push(name.to_string());
        self.sort_selected();
        true
    }

    pub fn deselect(&mut self, name: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|entry| entry != name);
        self.selected.len() != before
    }

    pub fn select_all(&mut self) -> bool {
        if self.selected.len() == self.items.len() {
            return false;
        }
        self.selected = self.items.clone();
        true
    }

    pub fn deselect_all(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Replaces the selection; names that are not offered are ignored.
    pub fn set_selected<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let previous = std::mem::take(&mut self.selected);
        for name in names {
            let name = name.as_ref();
            if self.items.iter().any(|item| item == name) && !self.is_selected(name) {
                self.selected.push(name.to_string());
            }
        }
        self.sort_selected();
        previous != self.selected
    }

    fn sort_selected(&mut self) {
        let items = &self.items;
        self.selected.sort_by_key(|entry| {
            items
                .iter()
                .position(|item| item == entry)
                .unwrap_or(usize::MAX)
        });
    }
}
