//! End-to-end replication over an in-memory byte stream.

mod support;

use std::sync::Arc;
use std::time::Duration;

use maumau_link::core::{GameConfig, GameError, Move, Seat};
use maumau_link::protocol::{NO_WISH, OP_PLAY};
use maumau_link::{BoardEvent, ProtocolEngine, SeatPlayer};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::mpsc::UnboundedReceiver;
use support::table_pair::{legal_moves, request};

struct Session {
    host: Arc<SeatPlayer>,
    guest: Arc<SeatPlayer>,
    host_events: UnboundedReceiver<BoardEvent>,
    guest_events: UnboundedReceiver<BoardEvent>,
    engines: (ProtocolEngine, ProtocolEngine),
}

fn seat_pair(config: GameConfig) -> (Arc<SeatPlayer>, Arc<SeatPlayer>) {
    support::init_test_logging();

    let host = Arc::new(SeatPlayer::new("Alice", Seat::FIRST, config.clone()).unwrap());
    let guest = Arc::new(SeatPlayer::new("Bob", Seat::SECOND, config).unwrap());
    (host, guest)
}

async fn connect(config: GameConfig) -> Session {
    let (host, guest) = seat_pair(config);
    connect_players(host, guest).await
}

async fn connect_players(host: Arc<SeatPlayer>, guest: Arc<SeatPlayer>) -> Session {
    let host_events = host.subscribe();
    let guest_events = guest.subscribe();

    let (a, b) = tokio::io::duplex(64 * 1024);
    let (a_rd, a_wr) = tokio::io::split(a);
    let (b_rd, b_wr) = tokio::io::split(b);

    let (host_engine, guest_engine) = tokio::join!(
        ProtocolEngine::start(Arc::clone(&host), a_rd, a_wr),
        ProtocolEngine::start(Arc::clone(&guest), b_rd, b_wr),
    );

    Session {
        host,
        guest,
        host_events,
        guest_events,
        engines: (host_engine.unwrap(), guest_engine.unwrap()),
    }
}

async fn next_event(events: &mut UnboundedReceiver<BoardEvent>) -> BoardEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for a board event")
        .expect("event hub closed")
}

#[tokio::test]
async fn test_handshake_establishes_identical_tables() {
    let mut session = connect(GameConfig::new().with_seed(8)).await;

    assert_eq!(session.engines.0.partner(), "Bob");
    assert_eq!(session.engines.1.partner(), "Alice");
    assert_eq!(session.host.partner_name().as_deref(), Some("Bob"));
    assert_eq!(
        next_event(&mut session.guest_events).await,
        BoardEvent::SessionEstablished { partner: "Alice".to_string() }
    );
    assert_eq!(session.host.snapshot().fingerprint(), session.guest.snapshot().fingerprint());
    assert_eq!(session.host.top_card(), session.guest.top_card());
    assert!(session.host.is_my_turn());
    assert!(!session.guest.is_my_turn());
}

#[tokio::test]
async fn test_moves_before_session_do_not_split_the_table() {
    let (host, guest) = seat_pair(GameConfig::new().with_seed(13));

    assert_eq!(host.request_draw(), Err(GameError::NotInGame));
    assert_eq!(guest.request_draw(), Err(GameError::NotInGame));
    assert_eq!(host.hand().len(), 0);

    let session = connect_players(host, guest).await;

    assert_eq!(session.host.snapshot(), session.guest.snapshot());
    assert_eq!(session.host.hand().len(), 7);
    assert_eq!(session.guest.hand().len(), 7);
    assert_ne!(session.host.is_my_turn(), session.guest.is_my_turn());
    assert_eq!(session.host.current_turn(), session.guest.current_turn());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_play_on_session_established_reaches_peer() {
    let (host, guest) = seat_pair(GameConfig::new().with_seed(34));
    let mut host_events = host.subscribe();

    // Plays the moment the session is announced, racing the engine setup.
    let eager = {
        let host = Arc::clone(&host);
        tokio::spawn(async move {
            while let Some(event) = host_events.recv().await {
                if let BoardEvent::SessionEstablished { .. } = event {
                    let mv = legal_moves(&host)[0];
                    return request(&host, mv).map(|_| mv);
                }
            }
            Err(GameError::NotInGame)
        })
    };

    let mut session = connect_players(host, guest).await;
    let played = eager.await.unwrap().expect("move refused right after the announcement");

    assert_eq!(
        next_event(&mut session.guest_events).await,
        BoardEvent::SessionEstablished { partner: "Alice".to_string() }
    );
    assert_eq!(next_event(&mut session.guest_events).await, BoardEvent::BoardChanged);
    assert_eq!(session.guest.snapshot(), session.host.snapshot());
    if let Move::Play { card, .. } = played {
        assert_eq!(session.guest.top_card(), Some(card));
    }
}

#[tokio::test]
async fn test_seat_zero_play_reaches_seat_one() {
    let mut session = connect(GameConfig::new().with_seed(21)).await;
    next_event(&mut session.guest_events).await;

    let moves = legal_moves(&session.host);
    request(&session.host, moves[0]).unwrap();

    assert_eq!(next_event(&mut session.guest_events).await, BoardEvent::BoardChanged);
    assert_eq!(session.guest.top_card(), session.host.top_card());
    assert_eq!(session.guest.current_turn(), session.host.current_turn());
    assert_eq!(session.guest.snapshot(), session.host.snapshot());
}

#[tokio::test]
async fn test_full_game_stays_in_sync() {
    let mut session = connect(GameConfig::new().with_seed(5150)).await;
    next_event(&mut session.host_events).await;
    next_event(&mut session.guest_events).await;

    for round in 0..500usize {
        let seat = session.host.current_turn();
        let (actor, mirror_events) = if seat == Seat::FIRST {
            (&session.host, &mut session.guest_events)
        } else {
            (&session.guest, &mut session.host_events)
        };

        let moves = legal_moves(actor);
        let mv = moves[round % moves.len()];
        let won = match request(actor, mv) {
            Ok(won) => won,
            Err(GameError::ForcedTurnEnd { .. }) => break,
            Err(err) => panic!("legal move rejected: {err}"),
        };

        assert_eq!(next_event(mirror_events).await, BoardEvent::BoardChanged);
        assert_eq!(session.host.snapshot(), session.guest.snapshot());

        if won {
            assert_eq!(next_event(mirror_events).await, BoardEvent::OpponentWon);
            assert!(actor.has_won());
            break;
        }
    }

    assert!(session.host.with_state(|s| s.check_conservation()).is_ok());
}

/// Handshake against a scripted peer playing seat 1.
async fn scripted_guest(host: Arc<SeatPlayer>) -> (ProtocolEngine, DuplexStream) {
    let (local, mut remote) = tokio::io::duplex(64 * 1024);
    let (rd, wr) = tokio::io::split(local);

    let peer = async move {
        remote.write_u16(3).await.unwrap();
        remote.write_all(b"Bob").await.unwrap();
        let len = remote.read_u16().await.unwrap() as usize;
        let mut name = vec![0u8; len];
        remote.read_exact(&mut name).await.unwrap();
        remote
    };

    let (engine, remote) = tokio::join!(ProtocolEngine::start(host, rd, wr), peer);
    (engine.unwrap(), remote)
}

#[tokio::test]
async fn test_malformed_color_is_fatal() {
    let host = Arc::new(SeatPlayer::new("Alice", Seat::FIRST, GameConfig::new().with_seed(1)).unwrap());
    let mut events = host.subscribe();
    let (engine, mut remote) = scripted_guest(Arc::clone(&host)).await;
    next_event(&mut events).await;

    for word in [OP_PLAY, 9, 5, NO_WISH] {
        remote.write_u32(word).await.unwrap();
    }

    match next_event(&mut events).await {
        BoardEvent::FatalProtocolError(message) => assert!(message.contains("color")),
        other => panic!("expected a fatal protocol error, got {other:?}"),
    }
    engine.join().await;
}

#[tokio::test]
async fn test_closed_stream_ends_session() {
    let host = Arc::new(SeatPlayer::new("Alice", Seat::FIRST, GameConfig::new().with_seed(1)).unwrap());
    let mut events = host.subscribe();
    let (engine, remote) = scripted_guest(Arc::clone(&host)).await;
    next_event(&mut events).await;

    drop(remote);

    assert_eq!(next_event(&mut events).await, BoardEvent::SessionEnded);
    engine.join().await;
    assert!(host.is_my_turn());
    assert!(!host.is_live());
    assert_eq!(host.request_draw(), Err(GameError::NotInGame));
}
