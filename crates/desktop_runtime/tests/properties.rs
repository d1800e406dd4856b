use std::collections::HashSet;

use desktop_runtime::{
    use_cases, AppId, FileSystemPort, FileSystemStore, FsNode, NodeId, OpenWindowRequest,
    WindowId, WindowManager, WindowSize,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum WindowOp {
    Open { min_w: i32, min_h: i32 },
    Close(u64),
    Minimize(u64),
    Maximize(u64),
    Restore(u64),
    Focus(u64),
    Move(u64, i32, i32),
    Resize(u64, i32, i32),
}

fn window_op() -> impl Strategy<Value = WindowOp> {
    let id = 1u64..12;
    prop_oneof![
        (50i32..400, 50i32..400).prop_map(|(min_w, min_h)| WindowOp::Open { min_w, min_h }),
        id.clone().prop_map(WindowOp::Close),
        id.clone().prop_map(WindowOp::Minimize),
        id.clone().prop_map(WindowOp::Maximize),
        id.clone().prop_map(WindowOp::Restore),
        id.clone().prop_map(WindowOp::Focus),
        (id.clone(), -2000i32..2000, -2000i32..2000).prop_map(|(i, x, y)| WindowOp::Move(i, x, y)),
        (id, -100i32..1200, -100i32..1200).prop_map(|(i, w, h)| WindowOp::Resize(i, w, h)),
    ]
}

/// Applies one op and returns the window it raised to the top, if any.
fn apply(windows: &mut WindowManager, op: WindowOp) -> Option<WindowId> {
    let raised = |id: u64, ok: bool| ok.then_some(WindowId(id));
    match op {
        WindowOp::Open { min_w, min_h } => Some(
            use_cases::open_app(
                windows,
                OpenWindowRequest::new(AppId::Notepad).with_min_size(WindowSize {
                    w: min_w,
                    h: min_h,
                }),
            )
            .id,
        ),
        WindowOp::Close(id) => {
            use_cases::close_window(windows, WindowId(id));
            None
        }
        WindowOp::Minimize(id) => {
            use_cases::minimize_window(windows, WindowId(id));
            None
        }
        WindowOp::Maximize(id) => raised(id, use_cases::maximize_window(windows, WindowId(id))),
        WindowOp::Restore(id) => raised(id, use_cases::restore_window(windows, WindowId(id))),
        WindowOp::Focus(id) => raised(id, use_cases::focus_window(windows, WindowId(id))),
        WindowOp::Move(id, x, y) => {
            use_cases::move_window(windows, WindowId(id), x, y);
            None
        }
        WindowOp::Resize(id, w, h) => {
            use_cases::resize_window(windows, WindowId(id), w, h);
            None
        }
    }
}

#[derive(Debug, Clone)]
enum FsOp {
    Folder(usize),
    File(usize),
    Delete(usize),
}

fn fs_op() -> impl Strategy<Value = FsOp> {
    prop_oneof![
        3 => (0usize..16).prop_map(FsOp::Folder),
        3 => (0usize..16).prop_map(FsOp::File),
        1 => (0usize..16).prop_map(FsOp::Delete),
    ]
}

/// Picks an existing folder (or the root) by index so generated trees nest.
fn pick_parent(fs: &FileSystemStore, index: usize) -> Option<NodeId> {
    let folders = folder_ids(fs);
    if folders.is_empty() || index % (folders.len() + 1) == 0 {
        None
    } else {
        Some(folders[index % (folders.len() + 1) - 1])
    }
}

fn folder_ids(fs: &FileSystemStore) -> Vec<NodeId> {
    all_nodes(fs)
        .into_iter()
        .filter(|node| node.is_folder())
        .map(FsNode::id)
        .collect()
}

fn all_nodes(fs: &FileSystemStore) -> Vec<&FsNode> {
    let mut out = Vec::new();
    for root in fs.get_root_nodes() {
        out.push(root);
        out.extend(fs.descendants(root.id()).into_iter().filter_map(|id| fs.get_node(id)));
    }
    out
}

proptest! {
    /// Open windows never share a z-index and sizes respect their minimum. The window most
    /// recently opened or raised holds the strict maximum z and is active unless minimized.
    #[test]
    fn window_invariants_hold(ops in prop::collection::vec(window_op(), 1..60)) {
        let mut windows = WindowManager::default();
        let mut last_raised: Option<WindowId> = None;
        for op in ops {
            if let Some(id) = apply(&mut windows, op) {
                last_raised = Some(id);
            }

            let all = use_cases::get_windows(&windows);
            let distinct: HashSet<u32> = all.iter().map(|w| w.z_index).collect();
            prop_assert_eq!(distinct.len(), all.len());

            for window in all {
                prop_assert!(window.rect.w >= window.min_size.w);
                prop_assert!(window.rect.h >= window.min_size.h);
            }

            let top = last_raised.and_then(|id| use_cases::get_window(&windows, id));
            let Some(top) = top else {
                continue;
            };
            for other in all.iter().filter(|w| w.id != top.id) {
                prop_assert!(top.z_index > other.z_index);
            }
            if !top.is_minimized() {
                prop_assert_eq!(windows.active_window_id(), Some(top.id));
            }
        }
    }

    /// Deleting a folder removes its whole subtree and never orphans a node.
    #[test]
    fn cascade_delete_leaves_no_orphans(ops in prop::collection::vec(fs_op(), 1..80)) {
        let mut fs = FileSystemStore::new();
        for (step, op) in ops.into_iter().enumerate() {
            match op {
                FsOp::Folder(index) => {
                    let parent = pick_parent(&fs, index);
                    use_cases::create_folder(&mut fs, &format!("folder-{step}"), parent)
                        .map_err(|e| TestCaseError::fail(e.to_string()))?;
                }
                FsOp::File(index) => {
                    let parent = pick_parent(&fs, index);
                    use_cases::create_file(&mut fs, &format!("file-{step}.txt"), "", parent)
                        .map_err(|e| TestCaseError::fail(e.to_string()))?;
                }
                FsOp::Delete(index) => {
                    let Some(target) = pick_parent(&fs, index) else {
                        continue;
                    };
                    let expected: HashSet<NodeId> = std::iter::once(target)
                        .chain(fs.descendants(target))
                        .collect();
                    let removed: HashSet<NodeId> =
                        use_cases::delete_node(&mut fs, target).into_iter().collect();
                    prop_assert_eq!(&removed, &expected);
                    for id in &removed {
                        prop_assert!(fs.get_node(*id).is_none());
                    }
                }
            }

            let reachable = all_nodes(&fs);
            prop_assert_eq!(reachable.len(), fs.len());
            for node in reachable {
                if let Some(parent) = node.parent_id() {
                    prop_assert!(fs.get_node(parent).is_some_and(FsNode::is_folder));
                }
            }
        }
    }
}
