// Two seat players wired together in memory, without a byte stream.

use maumau_link::cards::Card;
use maumau_link::core::{GameConfig, GameError, Move, Seat};
use maumau_link::rules::can_play;
use maumau_link::SeatPlayer;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

pub struct TablePair {
    pub host: SeatPlayer,
    pub guest: SeatPlayer,
    // Outbound queues kept open so local moves are accepted.
    _links: (UnboundedReceiver<Move>, UnboundedReceiver<Move>),
}

/// Attach an outbound queue to `player` so it accepts local moves.
pub fn go_live(player: &SeatPlayer) -> UnboundedReceiver<Move> {
    let (tx, rx) = unbounded_channel();
    player.attach_outbound(tx);
    rx
}

impl TablePair {
    /// Deal a game the way the handshake would.
    pub fn dealt(config: GameConfig) -> Self {
        let host = SeatPlayer::new("Alice", Seat::FIRST, config.clone()).unwrap();
        let guest = SeatPlayer::new("Bob", Seat::SECOND, config).unwrap();

        let (draw_pile, top) = host.handshake_table().unwrap();
        guest.synchronize_table(draw_pile, top);
        host.deal_hands().unwrap();
        guest.deal_hands().unwrap();
        let links = (go_live(&host), go_live(&guest));

        Self { host, guest, _links: links }
    }

    pub fn player(&self, seat: Seat) -> &SeatPlayer {
        if seat == Seat::FIRST {
            &self.host
        } else {
            &self.guest
        }
    }

    /// The player whose turn it is, and the other one.
    pub fn acting(&self) -> (&SeatPlayer, &SeatPlayer) {
        let seat = self.host.current_turn();
        (self.player(seat), self.player(seat.other()))
    }

    /// Legal moves for the acting seat, draw last.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.acting().0)
    }

    /// Apply `mv` for the acting seat and mirror it onto the other seat.
    ///
    /// Returns false when the game cannot continue.
    pub fn step(&self, mv: Move) -> bool {
        let (actor, mirror) = self.acting();
        match request(actor, mv) {
            Ok(won) => {
                assert!(mirror.apply_remote(mv).is_some());
                !won
            }
            Err(GameError::ForcedTurnEnd { .. }) => false,
            Err(err) => panic!("legal move rejected: {err}"),
        }
    }
}

/// Legal moves for `actor`, draw last. Jacks wish for the top card's color.
pub fn legal_moves(actor: &SeatPlayer) -> Vec<Move> {
    let top = actor.top_card().unwrap();
    let wish = actor.wished_color();

    let mut moves: Vec<Move> = actor
        .hand()
        .into_iter()
        .filter(|&card| can_play(card, top, wish))
        .map(|card: Card| {
            if card.is_jack() {
                Move::play_wishing(card, top.color)
            } else {
                Move::play(card)
            }
        })
        .collect();
    moves.push(Move::Draw);
    moves
}

/// Issue `mv` through the local request path. `Ok(true)` means the actor won.
pub fn request(actor: &SeatPlayer, mv: Move) -> Result<bool, GameError> {
    match mv {
        Move::Play { card, wish } => actor.request_play(card, wish).map(|o| o.won),
        Move::Draw => actor.request_draw().map(|_| false),
    }
}
