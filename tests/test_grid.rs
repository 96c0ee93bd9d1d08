use chrono::{Datelike, Days, NaiveDate, Weekday};
use rat_date_picker::grid::{CalendarGrid, CELLS, WEEKS};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

#[test]
fn test_layout() {
    let grid = CalendarGrid::build(date(2021, 6, 15), None);

    assert_eq!(grid.cells().len(), CELLS);
    assert_eq!(grid.rows().count(), WEEKS);
    assert_eq!(grid.first_date(), date(2021, 5, 31));
    assert_eq!(grid.last_date(), date(2021, 7, 11));

    for w in grid.cells().windows(2) {
        assert_eq!(w[0].date + Days::new(1), w[1].date);
    }
    for week in grid.rows() {
        assert_eq!(week[0].date.weekday(), Weekday::Mon);
        assert_eq!(week[6].date.weekday(), Weekday::Sun);
    }
}

#[test]
fn test_current_month() {
    let grid = CalendarGrid::build(date(2021, 6, 15), None);

    let n = grid.cells().iter().filter(|v| v.in_current_month).count();
    assert_eq!(n, 30);
    assert!(!grid.cells()[0].in_current_month);
    assert!(grid.cells()[1].in_current_month);
    assert_eq!(grid.cells()[1].date, date(2021, 6, 1));
    assert!(grid.cells()[30].in_current_month);
    assert!(!grid.cells()[31].in_current_month);
}

#[test]
fn test_month_starts_monday() {
    let grid = CalendarGrid::build(date(2021, 2, 10), None);
    assert_eq!(grid.first_date(), date(2021, 2, 1));
    assert!(grid.cells()[0].in_current_month);
    assert_eq!(CalendarGrid::start_date(date(2021, 2, 28)), date(2021, 2, 1));
    assert_eq!(CalendarGrid::start_date(date(2021, 6, 30)), date(2021, 5, 31));
}

#[test]
fn test_last_row_hidden() {
    // february 2021 fills exactly 4 weeks.
    let grid = CalendarGrid::build(date(2021, 2, 10), None);
    assert!(grid.last_row_hidden());

    // june 2021 ends in the 5th week.
    let grid = CalendarGrid::build(date(2021, 6, 15), None);
    assert!(grid.last_row_hidden());

    // august 2021 starts on a sunday and needs 6 weeks.
    let grid = CalendarGrid::build(date(2021, 8, 1), None);
    assert_eq!(grid.first_date(), date(2021, 7, 26));
    assert!(!grid.last_row_hidden());
    assert!(grid.cells()[36].in_current_month);
    assert_eq!(grid.cells()[36].date, date(2021, 8, 31));
}

fn days_in_month(y: i32, m: u32) -> u32 {
    let first = date(y, m, 1);
    let next = if m == 12 {
        date(y + 1, 1, 1)
    } else {
        date(y, m + 1, 1)
    };
    (next - first).num_days() as u32
}

#[test]
fn test_all_months() {
    let years = [
        0, 1, 4, 50, 99, 100, 400, 1900, 1999, 2000, 2015, 2021, 2024, 2100, 9998, 9999,
    ];

    let mut hidden = 0;
    let mut shown = 0;
    let mut offsets = [false; 7];
    for y in years {
        for m in 1..=12 {
            let dim = days_in_month(y, m);
            let first = date(y, m, 1);
            let offset = first.weekday().num_days_from_monday();
            offsets[offset as usize] = true;

            for d in [1, 15, dim] {
                let grid = CalendarGrid::build(date(y, m, d), None);

                assert_eq!(grid.cells().len(), CELLS);
                assert_eq!(grid.first_date(), first - Days::new(offset as u64));
                assert_eq!(grid.first_date().weekday(), Weekday::Mon);
                assert_eq!(grid.last_date().weekday(), Weekday::Sun);
                for w in grid.cells().windows(2) {
                    assert_eq!(w[0].date + Days::new(1), w[1].date);
                }

                let in_month = grid.cells().iter().filter(|v| v.in_current_month).count();
                assert_eq!(in_month as u32, dim, "{}-{}", y, m);
                assert_eq!(grid.index_of(first), Some(offset as usize));
                assert_eq!(grid.focusable_count(), 1);

                // the last row is hidden exactly when the month
                // ends within the first five weeks.
                let expect_hidden = offset + dim <= 35;
                assert_eq!(grid.last_row_hidden(), expect_hidden, "{}-{}", y, m);
                assert_eq!(
                    grid.last_row_hidden(),
                    grid.cells()[CELLS - 7..].iter().all(|v| !v.in_current_month)
                );
                if expect_hidden {
                    hidden += 1;
                } else {
                    shown += 1;
                }
            }
        }
    }
    assert!(hidden > 0);
    assert!(shown > 0);
    assert!(offsets.iter().all(|v| *v));
}

#[test]
fn test_focus_select() {
    let grid = CalendarGrid::build(date(2021, 6, 15), Some(date(2021, 6, 3)));

    assert_eq!(grid.focusable_count(), 1);
    assert_eq!(grid.focused_index(), Some(15));
    assert_eq!(grid.index_of(date(2021, 6, 15)), Some(15));
    assert!(grid.cells()[15].is_focusable);

    let selected = grid
        .cells()
        .iter()
        .filter(|v| v.is_selected)
        .collect::<Vec<_>>();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].date, date(2021, 6, 3));
}

#[test]
fn test_selected_outside() {
    // selected day in another month is not marked.
    let grid = CalendarGrid::build(date(2021, 6, 15), Some(date(2021, 9, 3)));
    assert!(grid.cells().iter().all(|v| !v.is_selected));

    // but it is marked if it's visible in the overflow.
    let grid = CalendarGrid::build(date(2021, 6, 15), Some(date(2021, 7, 2)));
    assert_eq!(grid.cells().iter().filter(|v| v.is_selected).count(), 1);
}

#[test]
fn test_set_focus() {
    let mut grid = CalendarGrid::build(date(2021, 6, 15), None);

    assert!(grid.set_focus(date(2021, 6, 23)));
    assert_eq!(grid.focusable_count(), 1);
    assert_eq!(grid.focused_index(), Some(23));

    assert!(!grid.set_focus(date(2021, 9, 1)));
    assert_eq!(grid.focused_index(), Some(23));

    grid.set_selected(Some(date(2021, 6, 20)));
    assert!(grid.cells()[20].is_selected);
    grid.set_selected(None);
    assert!(grid.cells().iter().all(|v| !v.is_selected));
}

#[test]
fn test_cell() {
    let grid = CalendarGrid::build(date(2021, 6, 15), None);

    assert_eq!(grid.cell(2, 1).map(|v| v.date), Some(date(2021, 6, 15)));
    assert!(grid.cell(6, 0).is_none());
    assert!(grid.cell(0, 7).is_none());
    assert!(grid.get(CELLS).is_none());
}
