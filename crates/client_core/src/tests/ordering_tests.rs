use super::*;
use shared::domain::{MenuItemSpec, MENU_ITEM_TYPE_CUSTOM, MENU_ITEM_TYPE_PAGE};

fn spec(id: i64, children: Vec<MenuItemSpec>) -> MenuItemSpec {
    MenuItemSpec {
        id: MenuItemId(id),
        name: format!("item-{id}"),
        type_tag: MENU_ITEM_TYPE_PAGE.to_string(),
        children,
    }
}

fn controller() -> MenuItemOrderingController {
    let tree = MenuItemTree::from_specs(&[
        spec(1, vec![]),
        spec(2, vec![spec(5, vec![]), spec(6, vec![])]),
        spec(3, vec![]),
        spec(4, vec![]),
    ])
    .expect("tree");
    MenuItemOrderingController::new(tree)
}

fn handle(controller: &MenuItemOrderingController, id: i64) -> ItemHandle {
    controller.tree().find(MenuItemId(id)).expect("handle")
}

fn drain(rx: &mut mpsc::UnboundedReceiver<MenuEvent>) -> Vec<MenuEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn root_ids(controller: &MenuItemOrderingController) -> Vec<i64> {
    controller
        .tree()
        .roots()
        .iter()
        .map(|handle| controller.tree().id_of(*handle).expect("id").0)
        .collect()
}

#[test]
fn selecting_replaces_previous_selection() {
    let mut controller = controller();
    let mut rx = controller.attach_observer();
    let first = handle(&controller, 1);
    let third = handle(&controller, 3);

    assert!(controller.select_item(Some(first)));
    assert!(controller.select_item(Some(third)));
    assert_eq!(controller.state(), OrderingState::ItemSelected(third));
    assert!(!controller.row_options(first).is_selected);
    assert!(controller.row_options(third).is_selected);

    assert_eq!(
        drain(&mut rx),
        vec![
            MenuEvent::SelectionChanged {
                previous: None,
                current: Some(MenuItemId(1)),
            },
            MenuEvent::SelectionChanged {
                previous: Some(MenuItemId(1)),
                current: Some(MenuItemId(3)),
            },
        ]
    );
}

#[test]
fn selecting_twice_is_idempotent() {
    let mut controller = controller();
    let mut rx = controller.attach_observer();
    let item = handle(&controller, 2);

    assert!(controller.select_item(Some(item)));
    assert!(!controller.select_item(Some(item)));
    assert_eq!(controller.selected_item(), Some(item));
    assert_eq!(drain(&mut rx).len(), 1);

    assert!(controller.select_item(None));
    assert_eq!(controller.state(), OrderingState::Idle);
    assert!(!controller.select_item(None));
}

#[test]
fn begin_adding_clears_selection_and_rejects_reentry() {
    let mut controller = controller();
    let first = handle(&controller, 1);
    let third = handle(&controller, 3);
    controller.select_item(Some(first));
    let mut rx = controller.attach_observer();

    assert!(controller.begin_adding_item(third));
    assert!(!controller.begin_adding_item(first));
    assert_eq!(controller.state(), OrderingState::Adding { anchor: third });
    assert!(!controller.select_item(Some(first)));

    assert_eq!(
        drain(&mut rx),
        vec![
            MenuEvent::SelectionChanged {
                previous: Some(MenuItemId(1)),
                current: None,
            },
            MenuEvent::AddingStarted {
                anchor: MenuItemId(3),
            },
        ]
    );
}

#[test]
fn cancel_adding_only_acts_in_adding_mode() {
    let mut controller = controller();
    let mut rx = controller.attach_observer();
    assert!(!controller.cancel_adding());

    let anchor = handle(&controller, 4);
    controller.begin_adding_item(anchor);
    assert!(controller.cancel_adding());
    assert_eq!(controller.state(), OrderingState::Idle);
    assert_eq!(controller.adding_anchor(), None);
    assert_eq!(
        drain(&mut rx).last(),
        Some(&MenuEvent::AddingCancelled {
            anchor: MenuItemId(4),
        })
    );
}

#[test]
fn commit_adding_inserts_after_anchor() {
    let mut controller = controller();
    let anchor = handle(&controller, 5);
    let parent = handle(&controller, 2);
    controller.begin_adding_item(anchor);
    let mut rx = controller.attach_observer();

    let added = controller
        .commit_adding(MenuItem::new(MenuItemId(9), "Docs", MENU_ITEM_TYPE_CUSTOM))
        .expect("add");

    assert_eq!(controller.state(), OrderingState::Idle);
    assert_eq!(controller.tree().parent_of(added), Some(parent));
    assert_eq!(controller.tree().position_of(added), Some(1));
    assert_eq!(controller.tree().position_of(handle(&controller, 6)), Some(2));
    assert_eq!(
        drain(&mut rx),
        vec![
            MenuEvent::ItemAdded {
                item_id: MenuItemId(9),
                parent: Some(MenuItemId(2)),
                position: 1,
            },
            MenuEvent::OrderChanged {
                parent: Some(MenuItemId(2)),
                first: 1,
                last: 2,
            },
        ]
    );
}

#[test]
fn commit_adding_outside_adding_mode_fails() {
    let mut controller = controller();
    let err = controller
        .commit_adding(MenuItem::new(MenuItemId(9), "Docs", MENU_ITEM_TYPE_CUSTOM))
        .expect_err("not adding");
    assert_eq!(err, AddItemError::NotAdding);
}

#[test]
fn commit_adding_duplicate_keeps_adding_mode() {
    let mut controller = controller();
    let anchor = handle(&controller, 1);
    controller.begin_adding_item(anchor);

    let err = controller
        .commit_adding(MenuItem::new(MenuItemId(3), "Dup", MENU_ITEM_TYPE_PAGE))
        .expect_err("duplicate");
    assert_eq!(err, AddItemError::Tree(MenuTreeError::DuplicateId(MenuItemId(3))));
    assert_eq!(controller.adding_anchor(), Some(anchor));
}

#[test]
fn order_change_clamps_and_reports_affected_range() {
    let mut controller = controller();
    let mut rx = controller.attach_observer();
    let first = handle(&controller, 1);

    let moved = controller.commit_order_change(first, 10).expect("move");
    assert_eq!((moved.from, moved.to), (0, 3));
    assert_eq!(root_ids(&controller), vec![2, 3, 4, 1]);

    controller.commit_order_change(first, -3).expect("move");
    assert_eq!(root_ids(&controller), vec![1, 2, 3, 4]);

    let positions: Vec<usize> = controller
        .tree()
        .roots()
        .iter()
        .map(|handle| controller.tree().position_of(*handle).expect("position"))
        .collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);

    assert_eq!(
        drain(&mut rx),
        vec![
            MenuEvent::OrderChanged {
                parent: None,
                first: 0,
                last: 3,
            },
            MenuEvent::OrderChanged {
                parent: None,
                first: 0,
                last: 3,
            },
        ]
    );
}

#[test]
fn moving_onto_own_position_is_silent() {
    let mut controller = controller();
    let mut rx = controller.attach_observer();
    let item = handle(&controller, 3);

    controller.commit_order_change(item, 2).expect("move");
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn editing_mode_drives_row_affordances() {
    let mut controller = controller();
    let first = handle(&controller, 1);
    let second = handle(&controller, 2);

    assert!(!controller.row_options(first).shows_editing_buttons);
    controller.set_editing(true);
    assert!(controller.row_options(first).shows_editing_buttons);

    controller.handle_row_action(second, RowAction::AddPressed);
    assert_eq!(
        controller.row_options(second),
        RowOptions {
            is_selected: false,
            shows_editing_buttons: false,
            shows_cancel_button: true,
        }
    );
    assert!(!controller.row_options(first).shows_cancel_button);

    controller.set_editing(false);
    assert_eq!(controller.state(), OrderingState::Idle);
}

#[test]
fn row_actions_forward_to_controller_operations() {
    let mut controller = controller();
    let item = handle(&controller, 4);

    assert!(controller.handle_row_action(item, RowAction::Selected));
    assert!(controller.handle_row_action(item, RowAction::AddPressed));
    assert!(controller.handle_row_action(item, RowAction::CancelPressed));
    assert_eq!(controller.state(), OrderingState::Idle);
}

#[test]
fn reset_detaches_observer_and_returns_to_idle() {
    let mut controller = controller();
    let mut rx = controller.attach_observer();
    controller.set_editing(true);
    controller.select_item(Some(handle(&controller, 1)));
    drain(&mut rx);

    controller.reset();
    controller.select_item(Some(handle(&controller, 2)));
    assert!(!controller.is_editing());
    assert!(rx.try_recv().is_err());
}
