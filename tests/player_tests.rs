use std::io::Cursor;

use broadside::{
    parse_point, AttackOutcome, AwfulPlayer, Board, Cell, GameConfig, GoodPlayer, HumanPlayer,
    MediocrePlayer, Player, Point, TargetingState,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_awful_stacks_ships_on_the_left() {
    let cfg = GameConfig::standard();
    let mut player = AwfulPlayer::new("awful", &cfg);
    let mut board = Board::new(&cfg);
    let mut rng = SmallRng::seed_from_u64(0);
    player.place_ships(&mut rng, &mut board).unwrap();
    for (k, ship) in cfg.ships().iter().enumerate() {
        for c in 0..ship.length() as i32 {
            assert_eq!(board.cell(Point::new(k as i32, c)), Some(Cell::Occupied(k)));
        }
        assert_eq!(
            board.cell(Point::new(k as i32, ship.length() as i32)),
            Some(Cell::Empty)
        );
    }
}

#[test]
fn test_awful_sweeps_backwards_and_wraps() {
    let cfg = GameConfig::new(2, 3).unwrap();
    let mut player = AwfulPlayer::new("awful", &cfg);
    let mut rng = SmallRng::seed_from_u64(0);
    let shots: Vec<Point> = (0..7)
        .map(|_| player.recommend_attack(&mut rng).unwrap())
        .collect();
    assert_eq!(
        shots,
        vec![
            Point::new(1, 2),
            Point::new(1, 1),
            Point::new(1, 0),
            Point::new(0, 2),
            Point::new(0, 1),
            Point::new(0, 0),
            Point::new(1, 2),
        ]
    );
}

#[test]
fn test_mediocre_stays_on_the_cross_after_a_hit() {
    let cfg = GameConfig::standard();
    let mut player = MediocrePlayer::new("mediocre", &cfg).unwrap();
    let mut rng = SmallRng::seed_from_u64(21);
    let anchor = Point::new(5, 5);
    player.record_attack_result(anchor, AttackOutcome::hit(1));

    let mut seen = Vec::new();
    for _ in 0..16 {
        let p = player.recommend_attack(&mut rng).unwrap();
        let dr = (p.row - anchor.row).abs();
        let dc = (p.col - anchor.col).abs();
        assert!((dr == 0 && (1..=4).contains(&dc)) || (dc == 0 && (1..=4).contains(&dr)));
        assert!(!seen.contains(&p));
        seen.push(p);
        player.record_attack_result(p, AttackOutcome::miss());
    }

    // Cross exhausted: back to random open cells.
    let p = player.recommend_attack(&mut rng).unwrap();
    assert!(p != anchor && !seen.contains(&p));
}

#[test]
fn test_mediocre_drops_lead_on_destruction() {
    let cfg = GameConfig::standard();
    let mut player = MediocrePlayer::new("mediocre", &cfg).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);
    player.record_attack_result(Point::new(0, 0), AttackOutcome::hit(4));
    player.record_attack_result(Point::new(0, 1), AttackOutcome::destroyed(4));
    let mut off_cross = false;
    for _ in 0..20 {
        let p = player.recommend_attack(&mut rng).unwrap();
        off_cross |= p.row > 4 || p.col > 4;
        player.record_attack_result(p, AttackOutcome::miss());
    }
    assert!(off_cross);
}

#[test]
fn test_good_player_enters_probe_after_a_hit() {
    let cfg = GameConfig::standard();
    let mut player = GoodPlayer::new("good", &cfg).unwrap();
    let mut rng = SmallRng::seed_from_u64(8);
    let first = player.recommend_attack(&mut rng).unwrap();
    assert!(cfg.is_valid(first));
    player.record_attack_result(first, AttackOutcome::hit(0));
    assert_eq!(player.targeting_state(), TargetingState::Probe);
    let next = player.recommend_attack(&mut rng).unwrap();
    assert_eq!((next.row - first.row).abs() + (next.col - first.col).abs(), 1);
}

#[test]
fn test_parse_point() {
    assert_eq!(parse_point("3 5\n"), Some(Point::new(3, 5)));
    assert_eq!(parse_point("  -1   12 extra"), Some(Point::new(-1, 12)));
    assert_eq!(parse_point("3"), None);
    assert_eq!(parse_point("a b"), None);
    assert_eq!(parse_point(""), None);
}

fn small_config() -> GameConfig {
    let mut cfg = GameConfig::new(3, 3).unwrap();
    cfg.add_ship(2, 'A', "dinghy").unwrap();
    cfg
}

#[test]
fn test_human_places_with_retries() {
    let cfg = small_config();
    let mut out = Vec::new();
    let mut human = HumanPlayer::new("Ann", &cfg, Cursor::new("x\nh\n5 5\n0 0\n"), &mut out);
    let mut board = Board::new(&cfg);
    let mut rng = SmallRng::seed_from_u64(0);
    human.place_ships(&mut rng, &mut board).unwrap();
    assert!(human.is_human());
    drop(human);

    assert_eq!(board.cell(Point::new(0, 0)), Some(Cell::Occupied(0)));
    assert_eq!(board.cell(Point::new(0, 1)), Some(Cell::Occupied(0)));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Ann must place 1 ships."));
    assert!(text.contains("Enter h or v for direction of dinghy (length 2): "));
    assert!(text.contains("Direction must be h or v."));
    assert!(text.contains("The ship can not be placed there."));
}

#[test]
fn test_human_placement_fails_at_end_of_input() {
    let cfg = small_config();
    let mut human = HumanPlayer::new("Ann", &cfg, Cursor::new("v\n"), Vec::new());
    let mut board = Board::new(&cfg);
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(human.place_ships(&mut rng, &mut board).is_err());
}

#[test]
fn test_human_attack_reprompts_until_two_integers() {
    let cfg = small_config();
    let mut out = Vec::new();
    let mut human = HumanPlayer::new("Ann", &cfg, Cursor::new("a b\n1 2\n"), &mut out);
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(human.recommend_attack(&mut rng), Some(Point::new(1, 2)));
    assert_eq!(human.recommend_attack(&mut rng), None);
    drop(human);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("You must enter two integers."));
    assert!(text.starts_with("Enter the row and column to attack (e.g., 3 5): "));
}
