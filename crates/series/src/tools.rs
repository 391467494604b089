use primitives::TimestampMs;

/// A drawing tied to one or more bar dates (trend line ends, markers, ...)
pub trait Anchored {
    fn anchors(&self) -> &[TimestampMs];
}

/// Drawing tools of one series, with "current" (being drawn) and "selected" markers.
#[derive(Debug, Clone)]
pub struct ToolManager<T> {
    tools: Vec<T>,
    current: Option<usize>,
    selected: Option<usize>,
}

impl<T> Default for ToolManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ToolManager<T> {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            current: None,
            selected: None,
        }
    }

    /// Adds a tool and makes it current; returns its position
    pub fn add(&mut self, tool: T) -> usize {
        self.tools.push(tool);
        let index = self.tools.len() - 1;
        self.current = Some(index);
        index
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.tools.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.tools.iter()
    }

    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|i| self.tools.get(i))
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|i| self.tools.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Returns false (and leaves the selection alone) for an unknown position
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tools.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn unselect(&mut self) {
        self.selected = None;
    }

    pub fn remove_current(&mut self) -> Option<T> {
        let index = self.current?;
        Some(self.remove_at(index))
    }

    pub fn remove_selected(&mut self) -> Option<T> {
        let index = self.selected?;
        Some(self.remove_at(index))
    }

    pub fn clear(&mut self) {
        self.tools.clear();
        self.current = None;
        self.selected = None;
    }

    fn remove_at(&mut self, index: usize) -> T {
        let tool = self.tools.remove(index);
        self.current = shift_after_removal(self.current, index);
        self.selected = shift_after_removal(self.selected, index);
        tool
    }
}

impl<T: Anchored> ToolManager<T> {
    /// Drops every tool with an anchor failing `keep`, clears both markers,
    /// and returns how many tools were dropped.
    pub fn retain_anchored(&mut self, mut keep: impl FnMut(TimestampMs) -> bool) -> usize {
        let before = self.tools.len();
        self.tools.retain(|t| t.anchors().iter().all(|&ts| keep(ts)));
        self.current = None;
        self.selected = None;
        before - self.tools.len()
    }
}

fn shift_after_removal(marker: Option<usize>, removed: usize) -> Option<usize> {
    match marker {
        Some(m) if m == removed => None,
        Some(m) if m > removed => Some(m - 1),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Line(Vec<TimestampMs>);

    impl Anchored for Line {
        fn anchors(&self) -> &[TimestampMs] {
            &self.0
        }
    }

    fn line(a: i64, b: i64) -> Line {
        Line(vec![TimestampMs(a), TimestampMs(b)])
    }

    #[test]
    fn add_makes_tool_current() {
        let mut m = ToolManager::new();
        assert!(m.current().is_none());

        m.add(line(1, 2));
        let idx = m.add(line(3, 4));

        assert_eq!(idx, 1);
        assert_eq!(m.count(), 2);
        assert_eq!(m.current(), Some(&line(3, 4)));
    }

    #[test]
    fn select_rejects_unknown_position() {
        let mut m = ToolManager::new();
        m.add(line(1, 2));

        assert!(!m.select(5));
        assert!(m.selected().is_none());
        assert!(m.select(0));
        assert_eq!(m.selected(), Some(&line(1, 2)));
        assert_eq!(m.selected_index(), Some(0));

        m.unselect();
        assert!(m.selected().is_none());
    }

    #[test]
    fn removing_earlier_tool_keeps_markers_on_same_objects() {
        let mut m = ToolManager::new();
        m.add(line(1, 2));
        m.add(line(3, 4));
        m.add(line(5, 6));
        m.select(0);

        // current is the last added; remove the selected one in front of it
        assert_eq!(m.remove_selected(), Some(line(1, 2)));
        assert!(m.selected().is_none());
        assert_eq!(m.current(), Some(&line(5, 6)));

        assert_eq!(m.remove_current(), Some(line(5, 6)));
        assert!(m.current().is_none());
        assert_eq!(m.remove_current(), None);
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn clear_forgets_tools_and_markers() {
        let mut m = ToolManager::new();
        m.add(line(1, 2));
        m.add(line(3, 4));
        m.select(1);
        assert_eq!(m.iter().count(), 2);

        m.clear();

        assert_eq!(m.count(), 0);
        assert!(m.iter().next().is_none());
        assert!(m.current().is_none());
        assert_eq!(m.selected_index(), None);
    }

    #[test]
    fn retain_anchored_drops_tools_with_missing_dates() {
        let mut m = ToolManager::new();
        m.add(line(1, 2));
        m.add(line(2, 9));
        m.select(0);

        let dropped = m.retain_anchored(|ts| ts.0 < 5);

        assert_eq!(dropped, 1);
        assert_eq!(m.count(), 1);
        assert_eq!(m.get(0), Some(&line(1, 2)));
        assert!(m.selected().is_none());
        assert!(m.current().is_none());
    }
}
