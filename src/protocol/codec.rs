//! Wire encoding.
//!
//! Every integer is a 4-byte big-endian `u32`. Names are a 2-byte big-endian
//! length followed by UTF-8 bytes.
//!
//! | message | fields |
//! |---|---|
//! | play | `0`, color, rank, wish or `4` |
//! | draw | `1` |
//!
//! Colors are clubs 0, spades 1, hearts 2, diamonds 3. Ranks are their face
//! value, 2 through 14.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::cards::{Card, Color, Rank};
use crate::core::action::Move;
use crate::core::error::ProtocolError;

/// Opcode for a played card.
pub const OP_PLAY: u32 = 0;

/// Opcode for a drawn card.
pub const OP_DRAW: u32 = 1;

/// Wish field value meaning no color was wished.
pub const NO_WISH: u32 = 4;

/// Wire code of a color.
#[must_use]
pub const fn color_code(color: Color) -> u32 {
    match color {
        Color::Clubs => 0,
        Color::Spades => 1,
        Color::Hearts => 2,
        Color::Diamonds => 3,
    }
}

/// Decode a color.
pub fn color_from_code(code: u32) -> Result<Color, ProtocolError> {
    match code {
        0 => Ok(Color::Clubs),
        1 => Ok(Color::Spades),
        2 => Ok(Color::Hearts),
        3 => Ok(Color::Diamonds),
        other => Err(ProtocolError::UnknownColor(other)),
    }
}

/// Decode a rank from its face value.
pub fn rank_from_code(code: u32) -> Result<Rank, ProtocolError> {
    Rank::from_face_value(code).ok_or(ProtocolError::UnknownRank(code))
}

fn wish_code(wish: Option<Color>) -> u32 {
    wish.map_or(NO_WISH, color_code)
}

fn wish_from_code(code: u32) -> Result<Option<Color>, ProtocolError> {
    if code == NO_WISH {
        Ok(None)
    } else {
        color_from_code(code).map(Some)
    }
}

/// Write a card as color then rank.
pub async fn write_card<W>(writer: &mut W, card: Card) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_u32(color_code(card.color)).await?;
    writer.write_u32(card.rank.face_value()).await?;
    Ok(())
}

/// Read a card written by [`write_card`].
pub async fn read_card<R>(reader: &mut R) -> Result<Card, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let color = color_from_code(reader.read_u32().await?)?;
    let rank = rank_from_code(reader.read_u32().await?)?;
    Ok(Card::new(color, rank))
}

/// Write a length-prefixed display name and flush it.
pub async fn write_name<W>(writer: &mut W, name: &str) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let len = u16::try_from(name.len()).map_err(|_| ProtocolError::NameTooLong(name.len()))?;
    writer.write_u16(len).await?;
    writer.write_all(name.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a length-prefixed display name.
pub async fn read_name<R>(reader: &mut R) -> Result<String, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u16().await? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(String::from_utf8(buf)?)
}

/// Write one steady-state message and flush it.
pub async fn write_move<W>(writer: &mut W, mv: &Move) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    match *mv {
        Move::Play { card, wish } => {
            writer.write_u32(OP_PLAY).await?;
            write_card(writer, card).await?;
            writer.write_u32(wish_code(wish)).await?;
        }
        Move::Draw => writer.write_u32(OP_DRAW).await?,
    }
    writer.flush().await?;
    Ok(())
}

/// Read one steady-state message.
///
/// An opcode other than play or draw yields `UnknownOpcode`, which the
/// session treats as the peer hanging up.
pub async fn read_message<R>(reader: &mut R) -> Result<Move, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    match reader.read_u32().await? {
        OP_PLAY => {
            let card = read_card(reader).await?;
            let wish = wish_from_code(reader.read_u32().await?)?;
            Ok(Move::Play { card, wish })
        }
        OP_DRAW => Ok(Move::Draw),
        other => Err(ProtocolError::UnknownOpcode(other)),
    }
}
