use birdlie_engine::{
    compute_best_days, compute_day_stats, compute_span_best_days, compute_span_stats, month_grid,
    BestDay, DayStatus, Direction, EngineError, Group, MemberId, MonthWindow, Mutation, Span,
    SpanDuration, WeekStartDay,
};

fn id(name: &str) -> MemberId {
    MemberId::from(name)
}

// ── Snapshot → views ────────────────────────────────────────────────────────

#[test]
fn test_two_members_one_free_vote() {
    let mut group = Group::new("K7Q2", ["Ana", "Ben"]).unwrap();
    let april = MonthWindow::new(3, 2025).unwrap();
    assert_eq!(group.cycle_status(&id("Ana"), april, 5).unwrap(), DayStatus::Free);

    let stats = compute_day_stats(&group, april);
    let day5 = &stats[4];
    assert_eq!(day5.free_members, vec![id("Ana")]);
    assert!(day5.partial_members.is_empty());
    assert_eq!(day5.voted_percentage, 50);
    assert!(day5.is_highlighted);

    assert_eq!(compute_best_days(&group, april), vec![BestDay { day: 5, count: 1 }]);
}

#[test]
fn test_snapshot_through_both_views() {
    let snapshot = r#"{
        "code": "SUMMER",
        "members": ["Ana", "Ben", "Cem", "Dora"],
        "calendar": {
            "Ana":  {"days": [
                {"monthIndex": 6, "day": 14, "status": "free", "user": "Ana"},
                {"monthIndex": 6, "day": 15, "status": "free", "user": "Ana"},
                {"monthIndex": 7, "day": 1,  "status": "partial", "user": "Ana"}
            ]},
            "Ben":  {"days": [
                {"monthIndex": 6, "day": 14, "status": "free", "user": "Ben"},
                {"monthIndex": 6, "day": 15, "status": "partial", "user": "Ben"}
            ]},
            "Cem":  {"days": [
                {"monthIndex": 6, "day": 15, "status": "free", "user": "Cem"}
            ], "notes": [
                {"monthIndex": 6, "day": 15, "text": "Festival!", "timestamp": "02.05.2025, 18:30", "user": "Cem"}
            ]}
        }
    }"#;
    let group = Group::from_json(snapshot).unwrap();
    let span = Span::new(6, 2025, SpanDuration::parse_label("2 Monate").unwrap()).unwrap();

    let months = compute_span_stats(&group, &span);
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, "Juli");
    assert_eq!(months[1].month, "August");

    let july = &months[0].stats;
    // day 14: 2/4 free; day 15: 2 free + 1 partial of 4
    assert_eq!(july[13].voted_percentage, 50);
    assert_eq!(july[14].voted_percentage, 75);
    assert!(july[14].is_highlighted);
    assert!(!july[13].is_highlighted);
    assert_eq!(july[14].notes.len(), 1);
    assert_eq!(july[14].date, "15.07");

    // August's only vote is partial: highlighted there, but no best day
    let august = &months[1].stats;
    assert!(august[0].is_highlighted);
    assert_eq!(august[0].voted_percentage, 25);

    let best = compute_span_best_days(&group, &span);
    assert_eq!(
        best[0].best_days,
        vec![BestDay { day: 14, count: 2 }, BestDay { day: 15, count: 2 }]
    );
    assert!(best[1].best_days.is_empty());
}

#[test]
fn test_recomputation_is_byte_identical() {
    let mut group = Group::new("G", ["Ana", "Ben", "Cem"]).unwrap();
    let june = MonthWindow::new(5, 2025).unwrap();
    for (who, day) in [("Ana", 3), ("Ben", 3), ("Cem", 9), ("Ana", 9)] {
        group.cycle_status(&id(who), june, day).unwrap();
    }
    group
        .add_note(&id("Ben"), june, 3, "Wer fährt?", "01.05.2025, 08:00")
        .unwrap();

    let first = serde_json::to_string(&compute_day_stats(&group, june)).unwrap();
    let reloaded = Group::from_json(&group.to_json().unwrap()).unwrap();
    let second = serde_json::to_string(&compute_day_stats(&reloaded, june)).unwrap();
    assert_eq!(first, second);
}

// ── Mutations ───────────────────────────────────────────────────────────────

#[test]
fn test_mutation_requests_return_fragment() {
    let mut group = Group::new("G", ["Ana"]).unwrap();
    let may = MonthWindow::new(4, 2025).unwrap();

    let fragment = group
        .apply(&id("Ana"), Mutation::CycleStatus { window: may, day: 31 })
        .unwrap()
        .clone();
    let json = serde_json::to_value(&fragment).unwrap();
    assert_eq!(json["days"][0]["status"], "free");
    assert_eq!(json["days"][0]["day"], 31);

    let june = MonthWindow::new(5, 2025).unwrap();
    let err = group
        .apply(&id("Ana"), Mutation::CycleStatus { window: june, day: 31 })
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDay { day: 31, .. }));
}

// ── Calendar navigation ─────────────────────────────────────────────────────

#[test]
fn test_paging_across_new_year() {
    let span = Span::new(11, 2025, SpanDuration::TwoMonths).unwrap();
    let dec = span.start();
    let jan = span.step(dec, Direction::Forward).unwrap();
    assert_eq!((jan.month_index(), jan.year()), (0, 2026));
    assert_eq!(jan, span.end());
    assert!(span.step(jan, Direction::Forward).is_none());

    let grid = month_grid(jan, WeekStartDay::Monday);
    // 1 January 2026 is a Thursday
    assert_eq!(grid.weeks[0][3], Some(1));
}
