//! Session handshake.
//!
//! Both sides send their display name, then read the peer's. Seat 0 then
//! sends its draw pile and first discard; seat 1 installs them. Finally both
//! sides deal both hands from the top of the now identical draw pile.
//!
//! The handshake does not announce the session. The caller does that once
//! the outbound queue is attached and local moves are accepted.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::codec::{read_card, read_name, write_card, write_name};
use crate::cards::DECK_SIZE;
use crate::core::error::{GameError, ProtocolError};
use crate::core::seat::Seat;
use crate::player::SeatPlayer;

/// Run the handshake for `player` and return the peer's name.
pub async fn perform_handshake<R, W>(
    player: &SeatPlayer,
    reader: &mut R,
    writer: &mut W,
) -> Result<String, ProtocolError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_name(writer, player.name()).await?;
    let partner = read_name(reader).await?;
    debug!(seat = %player.seat(), %partner, "names exchanged");

    if player.seat() == Seat::FIRST {
        send_table(player, writer).await?;
    } else {
        receive_table(player, reader).await?;
    }

    player.deal_hands().map_err(GameError::from)?;
    debug!(seat = %player.seat(), draw_pile = player.draw_pile_size(), "hands dealt");
    Ok(partner)
}

async fn send_table<W>(player: &SeatPlayer, writer: &mut W) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let (draw_pile, top) = player.handshake_table().map_err(GameError::from)?;

    let size = u32::try_from(draw_pile.len())
        .map_err(|_| ProtocolError::Handshake(format!("draw pile of {} cards", draw_pile.len())))?;
    writer.write_u32(size).await?;
    for &card in &draw_pile {
        write_card(writer, card).await?;
    }
    write_card(writer, top).await?;
    writer.flush().await?;
    Ok(())
}

async fn receive_table<R>(player: &SeatPlayer, reader: &mut R) -> Result<(), ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let size = reader.read_u32().await? as usize;
    if size >= DECK_SIZE {
        return Err(ProtocolError::Handshake(format!(
            "peer announced a draw pile of {size} cards"
        )));
    }

    let mut draw_pile = Vec::with_capacity(size);
    for _ in 0..size {
        draw_pile.push(read_card(reader).await?);
    }
    let top = read_card(reader).await?;

    player.synchronize_table(draw_pile, top);
    Ok(())
}
