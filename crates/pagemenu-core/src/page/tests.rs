use core::cell::Cell;

use super::*;
use crate::{item::ItemKind, value::ValueRef};

fn links<'a>(menu: &mut Menu<'a>, page: PageId, titles: &[&'a str]) -> [ItemId; 4] {
    let mut ids = [ItemId(0); 4];
    for (slot, title) in ids.iter_mut().zip(titles.iter().copied()) {
        *slot = menu.push_item(page, MenuItem::link(title, page)).unwrap();
    }
    ids
}

#[test]
fn parent_page_installs_back_item_and_focuses_past_it() {
    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    let settings = menu.add_page("Settings").unwrap();
    let [first, ..] = links(&mut menu, settings, &["Brightness"]);

    menu.set_parent_page(settings, root).unwrap();

    let page = menu.page(settings).unwrap();
    assert_eq!(page.focused_index(), 1);
    assert_eq!(page.visible_count(), 2);
    assert_eq!(page.total_count(), 2);
    assert_eq!(menu.current_item(settings), Some(first));

    let back = menu.item_at(settings, 0, false).unwrap();
    assert_eq!(page.back_item(), Some(back));
    assert!(matches!(menu.item(back).unwrap().kind(), ItemKind::Back(target) if target == root));
}

#[test]
fn parent_page_can_be_retargeted_without_second_back_item() {
    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    let other = menu.add_page("Other").unwrap();
    let child = menu.add_page("Child").unwrap();
    links(&mut menu, child, &["A"]);

    menu.set_parent_page(child, root).unwrap();
    menu.set_parent_page(child, other).unwrap();

    let page = menu.page(child).unwrap();
    assert_eq!(page.total_count(), 2);
    let back = page.back_item().unwrap();
    assert!(matches!(menu.item(back).unwrap().kind(), ItemKind::Back(target) if target == other));
}

#[test]
fn attaching_twice_is_rejected_without_side_effects() {
    let mut menu = Menu::new();
    let a = menu.add_page("A").unwrap();
    let b = menu.add_page("B").unwrap();
    let [item, ..] = links(&mut menu, a, &["Only"]);

    assert_eq!(menu.add_menu_item(b, item), Err(AttachError::AlreadyAttached));
    assert_eq!(menu.add_menu_item(a, item), Err(AttachError::AlreadyAttached));
    assert_eq!(menu.page(a).unwrap().total_count(), 1);
    assert_eq!(menu.page(b).unwrap().total_count(), 0);
    assert_eq!(menu.item(item).unwrap().parent(), Some(a));
}

#[test]
fn item_lookup_skips_hidden_items_unless_requested() {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let [a, b, c, _] = links(&mut menu, page, &["A", "B", "C"]);

    menu.hide_item(b).unwrap();

    assert_eq!(menu.item_at(page, 1, false), Some(c));
    assert_eq!(menu.item_at(page, 1, true), Some(b));
    assert_eq!(menu.item_at(page, 2, false), None);
    assert_eq!(menu.find_item_index(page, a), Some(0));
    assert_eq!(menu.find_item_index(page, b), None);
    assert_eq!(menu.page(page).unwrap().visible_count(), 2);
    assert_eq!(menu.page(page).unwrap().total_count(), 3);
}

#[test]
fn hiding_an_unfocused_item_keeps_the_focused_item() {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let [_, b, c, d] = links(&mut menu, page, &["A", "B", "C", "D"]);
    menu.set_focused_index(page, 2).unwrap();
    assert_eq!(menu.current_item(page), Some(c));

    menu.hide_item(b).unwrap();
    assert_eq!(menu.current_item(page), Some(c));

    menu.hide_item(d).unwrap();
    assert_eq!(menu.current_item(page), Some(c));
    assert_eq!(menu.page(page).unwrap().focused_index(), 1);
}

#[test]
fn hiding_the_focused_item_moves_focus_to_previous_item() {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let [_, b, c, _] = links(&mut menu, page, &["A", "B", "C"]);
    menu.set_focused_index(page, 2).unwrap();

    menu.hide_item(c).unwrap();

    assert_eq!(menu.current_item(page), Some(b));
    let state = menu.page(page).unwrap();
    assert!(state.focused_index() < state.visible_count());
}

#[test]
fn hiding_down_to_the_back_item_rests_focus_on_it() {
    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    let child = menu.add_page("Child").unwrap();
    let [a, b, ..] = links(&mut menu, child, &["A", "B"]);
    menu.set_parent_page(child, root).unwrap();
    assert_eq!(menu.current_item(child), Some(a));

    menu.hide_item(a).unwrap();
    assert_eq!(menu.current_item(child), Some(b));

    menu.hide_item(b).unwrap();
    let back = menu.page(child).unwrap().back_item();
    assert_eq!(menu.page(child).unwrap().focused_index(), 0);
    assert_eq!(menu.current_item(child), back);

    menu.show_item(a).unwrap();
    assert_eq!(menu.page(child).unwrap().focused_index(), 1);
    assert_eq!(menu.current_item(child), Some(a));
}

#[test]
fn showing_an_item_before_focus_keeps_the_focused_item() {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let [a, b, c, _] = links(&mut menu, page, &["A", "B", "C"]);
    menu.hide_item(a).unwrap();
    menu.set_focused_index(page, 1).unwrap();
    assert_eq!(menu.current_item(page), Some(c));

    menu.show_item(a).unwrap();
    assert_eq!(menu.current_item(page), Some(c));

    menu.show_item(b).unwrap();
    assert_eq!(menu.page(page).unwrap().visible_count(), 3);
}

#[test]
fn unattached_items_toggle_their_own_flag() {
    let level = Cell::new(3);
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let item = menu
        .insert_item(MenuItem::value("Level", ValueRef::Integer(&level)))
        .unwrap();

    menu.hide_item(item).unwrap();
    assert!(menu.item(item).unwrap().is_hidden());

    menu.add_menu_item(page, item).unwrap();
    let state = menu.page(page).unwrap();
    assert_eq!(state.total_count(), 1);
    assert_eq!(state.visible_count(), 0);
    assert_eq!(menu.current_item(page), None);

    menu.show_item(item).unwrap();
    assert_eq!(menu.current_item(page), Some(item));
}
