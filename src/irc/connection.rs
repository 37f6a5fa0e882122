//! Line transport: the raw byte stream to the server.
//!
//! The stream is split once at connect time. The read half goes to the main
//! loop as a [`LineReader`]; the write half sits behind a mutex in a
//! [`LineWriter`] that every task sends through.

use std::sync::Arc;

use rustls::pki_types::{InvalidDnsNameError, ServerName};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_rustls::TlsConnector;
use tracing::info;

type BoxedRead = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWrite = Box<dyn AsyncWrite + Send + Unpin>;

/// Longest inbound line accepted, terminator included. IRC itself allows
/// 512 bytes; tagged messages can be longer.
pub const MAX_LINE_LEN: usize = 8192;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TLS server name: {0}")]
    Tls(#[from] InvalidDnsNameError),
    #[error("server closed the connection")]
    EndOfStream,
    #[error("connection already closed")]
    Closed,
}

/// Open the connection to `host:port`, wrapping it in TLS when asked.
///
/// There is no retry and no timeout: a hung server stalls here.
pub async fn connect(
    host: &str,
    port: u16,
    tls: bool,
) -> Result<(LineReader, LineWriter), TransportError> {
    info!("Trying connection to {}:{} ...", host, port);
    let tcp = TcpStream::connect((host, port)).await?;

    let halves = if tls {
        let connector = TlsConnector::from(Arc::new(tls_config()));
        let server_name = ServerName::try_from(host.to_string())?;
        let stream = connector.connect(server_name, tcp).await?;
        let (read, write) = tokio::io::split(stream);
        (LineReader::new(read), LineWriter::new(write))
    } else {
        let (read, write) = tcp.into_split();
        (LineReader::new(read), LineWriter::new(write))
    };

    info!("Connected successfully to {}", host);
    Ok(halves)
}

fn tls_config() -> rustls::ClientConfig {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let roots = rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth()
}

/// Inbound half. Yields one line at a time with the terminator removed.
pub struct LineReader {
    inner: BufReader<BoxedRead>,
    buf: Vec<u8>,
}

impl LineReader {
    pub fn new(read: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            inner: BufReader::new(Box::new(read)),
            buf: Vec::with_capacity(512),
        }
    }

    /// Wait for the next full line.
    ///
    /// Cancel-safe: bytes of a partially received line stay in the internal
    /// buffer until the rest arrives. End of stream is an error, even when
    /// it cuts a line short, and so is a line longer than [`MAX_LINE_LEN`].
    pub async fn read_line(&mut self) -> Result<String, TransportError> {
        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                return Err(TransportError::EndOfStream);
            }

            let (used, done) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            };
            self.buf.extend_from_slice(&available[..used]);
            self.inner.consume(used);

            if self.buf.len() > MAX_LINE_LEN {
                self.buf.clear();
                return Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("line exceeds {} bytes", MAX_LINE_LEN),
                )));
            }
            if done {
                break;
            }
        }

        let raw = std::mem::take(&mut self.buf);
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Outbound half, shared by every writer.
///
/// The whole CRLF-terminated frame is written while the lock is held, so
/// concurrent writers never interleave within a line.
pub struct LineWriter {
    inner: Mutex<Option<BoxedWrite>>,
}

impl LineWriter {
    pub fn new(write: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self {
            inner: Mutex::new(Some(Box::new(write))),
        }
    }

    pub async fn write_line(&self, text: &str) -> Result<(), TransportError> {
        let mut guard = self.inner.lock().await;
        let writer = guard.as_mut().ok_or(TransportError::Closed)?;
        write_frame(writer, text).await
    }

    /// Write one last line, then close. No other writer can get a line onto
    /// the wire after this one.
    pub async fn finish(&self, text: &str) -> Result<(), TransportError> {
        let mut guard = self.inner.lock().await;
        let mut writer = guard.take().ok_or(TransportError::Closed)?;
        write_frame(&mut writer, text).await?;
        writer.shutdown().await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<(), TransportError> {
        if let Some(mut writer) = self.inner.lock().await.take() {
            writer.shutdown().await?;
        }
        Ok(())
    }
}

async fn write_frame(writer: &mut BoxedWrite, text: &str) -> Result<(), TransportError> {
    let mut frame = String::with_capacity(text.len() + 2);
    frame.push_str(text);
    frame.push_str("\r\n");
    writer.write_all(frame.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
