use super::*;

const LINES: &str = "\
# main lines
e2e4 e7e5 g1f3
e2e4 c7c5
d2d4 d7d5
";

fn after(moves: &[&str]) -> Position {
    let mut pos = Position::startpos();
    for mv in moves {
        pos.play(mv.parse().unwrap()).unwrap();
    }
    pos
}

#[test]
fn no_book_always_misses() {
    let mut book = NoBook;
    assert_eq!(book.query(&Position::startpos()).unwrap(), None);
    assert!(book.is_empty());
}

#[test]
fn lines_accumulate_weights() {
    let book = WeightedBook::from_lines(LINES).unwrap();

    // start, after e4, after e4 e5, after d4
    assert_eq!(book.len(), 4);

    let mut start = book.candidates(&Position::startpos());
    start.sort_by_key(|(mv, _)| mv.to_string());
    let start: Vec<(String, u32)> = start.into_iter().map(|(mv, w)| (mv.to_string(), w)).collect();
    assert_eq!(start, vec![("d2d4".to_string(), 1), ("e2e4".to_string(), 2)]);
}

#[test]
fn query_returns_book_move_for_known_position() {
    let mut book = WeightedBook::from_lines(LINES).unwrap().with_seed(1);
    let pos = after(&["e2e4", "e7e5"]);

    assert_eq!(book.query(&pos).unwrap(), Some("g1f3".parse().unwrap()));
    assert_eq!(book.query(&after(&["h2h3"])).unwrap(), None);
}

#[test]
fn seeded_choice_is_reproducible() {
    let picks = |seed| {
        let mut book = WeightedBook::from_lines(LINES).unwrap().with_seed(seed);
        (0..16)
            .map(|_| book.query(&Position::startpos()).unwrap().unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(7), picks(7));
}

#[test]
fn zero_weight_candidates_are_never_picked() {
    let json = r#"{"entries": [{
        "fen": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "moves": [{"move": "e2e4", "weight": 0}, {"move": "d2d4", "weight": 5}]
    }]}"#;
    let mut book = WeightedBook::from_json(json).unwrap().with_seed(3);
    for _ in 0..20 {
        assert_eq!(book.query(&Position::startpos()).unwrap(), Some("d2d4".parse().unwrap()));
    }
}

#[test]
fn json_matches_regardless_of_move_counters() {
    let json = r#"{"entries": [{
        "fen": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 7 12",
        "moves": [{"move": "c2c4"}]
    }]}"#;
    let mut book = WeightedBook::from_json(json).unwrap();
    assert_eq!(book.query(&Position::startpos()).unwrap(), Some("c2c4".parse().unwrap()));
}

#[test]
fn illegal_book_move_is_an_error() {
    let json = r#"{"entries": [{
        "fen": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "moves": [{"move": "e2e5"}]
    }]}"#;
    let mut book = WeightedBook::from_json(json).unwrap();
    assert!(matches!(
        book.query(&Position::startpos()),
        Err(BookError::IllegalMove { .. })
    ));
}

#[test]
fn all_zero_weights_is_an_error() {
    let json = r#"{"entries": [{
        "fen": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "moves": [{"move": "e2e4", "weight": 0}]
    }]}"#;
    let mut book = WeightedBook::from_json(json).unwrap();
    assert!(matches!(book.query(&Position::startpos()), Err(BookError::Entry { .. })));
}

#[test]
fn malformed_sources_are_rejected() {
    assert!(matches!(WeightedBook::from_json("{"), Err(BookError::Json(_))));
    assert!(matches!(
        WeightedBook::from_lines("e2e4 e2e4"),
        Err(BookError::Line { line: 1, .. })
    ));
    assert!(matches!(
        WeightedBook::from_lines("\ne2e4 zz"),
        Err(BookError::Line { line: 2, .. })
    ));
}

#[test]
fn json_round_trip_through_book_file() {
    let book = WeightedBook::from_lines(LINES).unwrap();
    let json = serde_json::to_string(&book.to_file()).unwrap();
    let reloaded = WeightedBook::from_json(&json).unwrap();

    assert_eq!(reloaded.len(), book.len());
    assert_eq!(
        reloaded.candidates(&after(&["e2e4"])).len(),
        book.candidates(&after(&["e2e4"])).len()
    );
}

#[test]
fn open_reads_both_formats() {
    let dir = std::env::temp_dir().join(format!("opening_book_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let lines_path = dir.join("book.txt");
    std::fs::write(&lines_path, LINES).unwrap();
    let book = open(&lines_path, Some(5)).unwrap();
    assert_eq!(book.len(), 4);

    let json_path = dir.join("book.json");
    std::fs::write(&json_path, serde_json::to_string(&book.to_file()).unwrap()).unwrap();
    assert_eq!(open(&json_path, None).unwrap().len(), 4);

    assert!(matches!(
        open(&dir.join("missing.json"), None),
        Err(BookError::Io(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}
