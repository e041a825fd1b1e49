//! The process's terminal handle.
//!
//! One `Terminal` is created in `main`, lent to whichever command runs,
//! and released with [`Terminal::close`] on the way out.

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use wkquiz_core::traits::Prompter;

/// Line-oriented prompts over an async reader/writer pair.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<BufReader<Stdin>, Stdout> {
    /// Standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Flush pending output and give up the handle.
    pub async fn close(mut self) -> Result<()> {
        self.output.flush().await?;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

#[async_trait]
impl<R, W> Prompter for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.say(question).await?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD so the answer is still graded.
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    async fn say(&mut self, line: &str) -> Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}
