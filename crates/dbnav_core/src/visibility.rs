use crate::node::{NavTree, ROOT_NAME};

impl NavTree {
    /// Forces open every node along `virtual_path`.
    ///
    /// The path starts at the root; a leading root segment is skipped. The walk
    /// stops at the first segment without a matching child, keeping whatever
    /// was already marked. Returns how many nodes were marked.
    pub fn mark_visible<S: AsRef<str>>(&mut self, virtual_path: &[S]) -> usize {
        let mut segments = virtual_path
            .iter()
            .map(|segment| segment.as_ref())
            .peekable();
        segments.next_if_eq(&ROOT_NAME);

        let mut current = self.root();
        let mut marked = 0;

        for segment in segments {
            let Some(child) = self.child_by_name(current, segment) else {
                log::debug!("Virtual path stops at {:?}", segment);
                break;
            };
            self.node_mut(child).visible = true;
            current = child;
            marked += 1;
        }

        marked
    }
}
