//! Length-prefixed bincode frames shared by the daemon and its clients.

use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest payload accepted from the other side.
pub const MAX_FRAME_LENGTH: u32 = 1024 * 1024;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("frame of {0} bytes exceeds the limit")]
    TooLarge(u32),
}

pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = bincode::serialize(message)?;
    let length = u32::try_from(payload.len()).map_err(|_| FrameError::TooLarge(u32::MAX))?;
    if length > MAX_FRAME_LENGTH {
        return Err(FrameError::TooLarge(length));
    }

    writer.write_all(&length.to_le_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut length_buffer = [0u8; 4];
    reader.read_exact(&mut length_buffer).await?;
    let length = u32::from_le_bytes(length_buffer);
    if length > MAX_FRAME_LENGTH {
        return Err(FrameError::TooLarge(length));
    }

    let mut payload = vec![0u8; length as usize];
    reader.read_exact(&mut payload).await?;
    Ok(bincode::deserialize(&payload)?)
}

#[cfg(unix)]
pub fn default_socket_path() -> PathBuf {
    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/run/user/{}/tomate.sock", uid))
}

#[cfg(windows)]
pub fn default_socket_path() -> PathBuf {
    let local_app_data = std::env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(format!(r"{}\tomate\tomate.sock", local_app_data))
}
