use broadside::{ConfigError, GameConfig, Point, MAX_COLS, MAX_ROWS};

#[test]
fn test_dimensions_are_bounded() {
    assert_eq!(GameConfig::new(0, 5), Err(ConfigError::RowsOutOfRange(0)));
    assert_eq!(
        GameConfig::new(MAX_ROWS + 1, 5),
        Err(ConfigError::RowsOutOfRange(MAX_ROWS + 1))
    );
    assert_eq!(GameConfig::new(5, 0), Err(ConfigError::ColsOutOfRange(0)));
    assert_eq!(
        GameConfig::new(5, MAX_COLS + 1),
        Err(ConfigError::ColsOutOfRange(MAX_COLS + 1))
    );
    let cfg = GameConfig::new(1, 10).unwrap();
    assert_eq!((cfg.rows(), cfg.cols()), (1, 10));
    assert_eq!(cfg.ship_count(), 0);
}

#[test]
fn test_standard_fleet() {
    let cfg = GameConfig::standard();
    assert_eq!((cfg.rows(), cfg.cols()), (10, 10));
    let symbols: String = cfg.ships().iter().map(|s| s.symbol()).collect();
    assert_eq!(symbols, "ABDSP");
    let lengths: Vec<usize> = cfg.ships().iter().map(|s| s.length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 3, 2]);
    assert_eq!(cfg.min_ship_length(), 2);
    assert_eq!(cfg.total_ship_cells(), 17);
    assert_eq!(cfg.ship_symbol(3), Some('S'));
    assert_eq!(cfg.ship_name(0), Some("aircraft carrier"));
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn test_add_ship_assigns_ids_in_order() {
    let mut cfg = GameConfig::new(4, 6).unwrap();
    assert_eq!(cfg.add_ship(3, 'C', "cruiser"), Ok(0));
    assert_eq!(cfg.add_ship(1, 'R', "raft"), Ok(1));
    assert_eq!(cfg.ship_length(1), Some(1));
    assert_eq!(cfg.ship_symbol(0), Some('C'));
    assert_eq!(cfg.ship_length(2), None);
    assert_eq!(cfg.min_ship_length(), 1);
}

#[test]
fn test_add_ship_rejects_bad_lengths() {
    let mut cfg = GameConfig::new(3, 5).unwrap();
    assert_eq!(cfg.add_ship(0, 'A', "none"), Err(ConfigError::BadLength(0)));
    assert_eq!(cfg.add_ship(6, 'A', "long"), Err(ConfigError::ShipDoesNotFit(6)));
    // Fits along the longer dimension only.
    assert_eq!(cfg.add_ship(5, 'A', "long"), Ok(0));
    assert_eq!(cfg.ship_count(), 1);
}

#[test]
fn test_add_ship_rejects_bad_symbols() {
    let mut cfg = GameConfig::new(10, 10).unwrap();
    assert_eq!(
        cfg.add_ship(2, '\n', "x"),
        Err(ConfigError::UnprintableSymbol('\n'))
    );
    assert_eq!(cfg.add_ship(2, 'é', "x"), Err(ConfigError::UnprintableSymbol('é')));
    for mark in ['.', 'o', 'X'] {
        assert_eq!(cfg.add_ship(2, mark, "x"), Err(ConfigError::ReservedSymbol(mark)));
    }
    cfg.add_ship(2, 'Z', "first").unwrap();
    assert_eq!(cfg.add_ship(3, 'Z', "second"), Err(ConfigError::DuplicateSymbol('Z')));
    assert_eq!(cfg.ship_count(), 1);
}

#[test]
fn test_add_ship_rejects_overfull_fleet() {
    let mut cfg = GameConfig::new(2, 2).unwrap();
    cfg.add_ship(2, 'A', "a").unwrap();
    cfg.add_ship(1, 'B', "b").unwrap();
    assert_eq!(cfg.add_ship(2, 'C', "c"), Err(ConfigError::BoardTooSmall));
    assert_eq!(cfg.add_ship(1, 'C', "c"), Ok(2));
}

#[test]
fn test_errors_display_readably() {
    assert_eq!(
        ConfigError::DuplicateSymbol('Q').to_string(),
        "Ship symbol Q must not be used for more than one ship"
    );
    assert_eq!(
        ConfigError::UnprintableSymbol('\u{7}').to_string(),
        "Unprintable character with value 7 must not be used as a ship symbol"
    );
}

#[test]
fn test_points_and_bounds() {
    let cfg = GameConfig::new(3, 4).unwrap();
    assert!(cfg.is_valid(Point::new(2, 3)));
    assert!(!cfg.is_valid(Point::new(3, 0)));
    assert!(!cfg.is_valid(Point::new(0, -1)));
    assert!(!cfg.is_valid(Point::new(0, 4)));
}
