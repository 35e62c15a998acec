use geomgr::layout::Error;
use geomgr::prelude::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn stretch_scenario() {
    init();
    let mut host = HeadlessContainer::new(Size(100, 30));
    let mut gm = Manager::new();
    let mut row = BoxLayout::with_spacing(&mut gm, Direction::LeftToRight, 0);
    row.bind(&mut gm).unwrap();
    let ws: Vec<_> = [(10, 100, 1), (20, 100, 1), (10, 20, 0)]
        .into_iter()
        .map(|(min, max, stretch)| {
            let w = host.add_child(Size(min, 0), Size(max, UNLIMITED));
            row.add_widget(&mut gm, w, stretch, Align::Stretch).unwrap();
            w
        })
        .collect();
    assert!(gm.activate(&mut host));
    assert_eq!(host.minimum_size(), Size(40, 1));
    assert_eq!(host.maximum_size(), Size(220, UNLIMITED));
    assert_eq!(host.rect(ws[0]), Rect::from_xywh(0, 0, 40, 30));
    assert_eq!(host.rect(ws[1]), Rect::from_xywh(40, 0, 50, 30));
    assert_eq!(host.rect(ws[2]), Rect::from_xywh(90, 0, 10, 30));
}

#[test]
fn right_to_left_row() {
    init();
    let mut host = HeadlessContainer::new(Size(60, 10));
    let mut gm = Manager::new();
    let mut row = BoxLayout::with_spacing(&mut gm, Direction::RightToLeft, 0);
    row.bind(&mut gm).unwrap();
    let ws: Vec<_> = [10, 20, 30]
        .into_iter()
        .map(|width| {
            let w = host.add_fixed_child(Size(width, 10));
            row.add_widget(&mut gm, w, 0, Align::Stretch).unwrap();
            w
        })
        .collect();
    gm.activate(&mut host);
    assert_eq!(host.rect(ws[0]), Rect::from_xywh(50, 0, 10, 10));
    assert_eq!(host.rect(ws[1]), Rect::from_xywh(30, 0, 20, 10));
    assert_eq!(host.rect(ws[2]), Rect::from_xywh(0, 0, 30, 10));
}

#[test]
fn bottom_to_top_column_with_border() {
    init();
    let mut host = HeadlessContainer::new(Size(50, 50));
    let mut gm = Manager::new();
    gm.set_border(5);
    let mut col = BoxLayout::with_spacing(&mut gm, Direction::Up, 0);
    col.bind(&mut gm).unwrap();
    let a = host.add_fixed_child(Size(40, 10));
    let b = host.add_child(Size(40, 10), Size(40, UNLIMITED));
    col.add_widget(&mut gm, a, 0, Align::Stretch).unwrap();
    col.add_widget(&mut gm, b, 1, Align::Stretch).unwrap();
    gm.activate(&mut host);
    assert_eq!(host.minimum_size(), Size(50, 30));
    assert_eq!(host.size(), Size(50, 50));
    assert_eq!(host.rect(a), Rect::from_xywh(5, 35, 40, 10));
    assert_eq!(host.rect(b), Rect::from_xywh(5, 5, 40, 30));
}

#[test]
fn nested_column_in_row() {
    init();
    let mut host = HeadlessContainer::new(Size(100, 60));
    let mut gm = Manager::new();
    let mut row = BoxLayout::with_spacing(&mut gm, Direction::LeftToRight, 0);
    row.bind(&mut gm).unwrap();
    let mut col = BoxLayout::with_spacing(&mut gm, Direction::Down, 0);

    let a = host.add_child(Size(20, 0), Size(20, UNLIMITED));
    let b = host.add_child(Size(10, 10), Size::UNLIMITED);
    let c = host.add_child(Size(10, 10), Size::UNLIMITED);
    col.add_widget(&mut gm, b, 0, Align::Stretch).unwrap();
    col.add_widget(&mut gm, c, 0, Align::Stretch).unwrap();
    row.add_widget(&mut gm, a, 0, Align::Stretch).unwrap();
    row.add_layout(&mut gm, &col, 1).unwrap();

    // a layout may only be nested once
    assert_eq!(
        row.add_layout(&mut gm, &col, 1),
        Err(Error::AlreadyAttached(col.horizontal_chain()))
    );

    gm.activate(&mut host);
    assert_eq!(host.minimum_size(), Size(30, 20));
    assert_eq!(host.rect(a), Rect::from_xywh(0, 0, 20, 60));
    assert_eq!(host.rect(b), Rect::from_xywh(20, 0, 80, 30));
    assert_eq!(host.rect(c), Rect::from_xywh(20, 30, 80, 30));
}

#[test]
fn row_in_grid_cell() {
    init();
    let mut host = HeadlessContainer::new(Size(100, 40));
    let mut gm = Manager::new();
    let mut grid = GridLayout::with_spacing(&mut gm, 1, 2, 0);
    grid.bind(&mut gm).unwrap();
    let mut row = BoxLayout::with_spacing(&mut gm, Direction::LeftToRight, 0);

    let label = host.add_fixed_child(Size(30, 10));
    let x = host.add_flexible_child();
    let y = host.add_flexible_child();
    row.add_widget(&mut gm, x, 1, Align::Stretch).unwrap();
    row.add_widget(&mut gm, y, 1, Align::Stretch).unwrap();
    grid.add_widget(&mut gm, label, 0, 0, AlignHints::CENTER)
        .unwrap();
    grid.add_layout(&mut gm, &row, 0, 1).unwrap();
    grid.set_col_stretch(&mut gm, 1, 1).unwrap();

    gm.activate(&mut host);
    assert_eq!(host.rect(label), Rect::from_xywh(0, 15, 30, 10));
    assert_eq!(host.rect(x), Rect::from_xywh(30, 0, 35, 40));
    assert_eq!(host.rect(y), Rect::from_xywh(65, 0, 35, 40));
}

#[test]
fn misconfiguration_leaves_layout_intact() {
    init();
    let mut host = HeadlessContainer::new(Size(50, 50));
    let mut gm = Manager::new();
    let mut row = BoxLayout::top_level(&mut gm, Direction::LeftToRight).unwrap();
    let w = host.add_flexible_child();
    row.add_widget(&mut gm, w, 0, Align::Stretch).unwrap();

    let vertical = gm.new_serial_chain(Direction::Down);
    assert!(matches!(
        gm.add_chain_to_chain(row.serial_chain(), vertical, 0),
        Err(Error::AxisMismatch { .. })
    ));
    assert!(matches!(
        gm.add_branch(row.serial_chain(), vertical, 0, 0),
        Err(Error::AxisMismatch { .. })
    ));
    let horizontal = gm.new_serial_chain(Direction::LeftToRight);
    assert_eq!(
        gm.add_branch(row.serial_chain(), horizontal, 0, 3),
        Err(Error::InvalidBranch { from: 0, to: 3, len: 1 })
    );

    assert!(gm.activate(&mut host));
    assert_eq!(host.rect(w), Rect::from_xywh(0, 0, 50, 50));
}
