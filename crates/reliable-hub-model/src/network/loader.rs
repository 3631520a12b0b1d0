// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::network::{
    builder::NetworkBuilder,
    config::ReliabilityConfig,
    err::NetworkLoaderError,
    net::Network,
    node::NodeIdentifier,
};
use reliable_hub_core::prelude::Probability;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Reads a network from a whitespace separated text format:
///
/// ```text
/// n
/// d(0,0) .. d(0,n-1)
/// ..
/// d(n-1,0) .. d(n-1,n-1)
/// f(0) .. f(n-1)
/// h
/// hub_0 .. hub_{h-1}
/// ```
///
/// `#` starts a comment that runs to the end of the line. The discount
/// factor and the reliability depth are not part of the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkLoader {
    config: ReliabilityConfig,
}

impl Default for NetworkLoader {
    fn default() -> Self {
        Self {
            config: ReliabilityConfig::default(),
        }
    }
}

impl NetworkLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    #[inline]
    pub fn depth(mut self, depth: usize) -> Self {
        self.config.depth = depth;
        self
    }

    #[inline]
    pub fn config(&self) -> &ReliabilityConfig {
        &self.config
    }

    pub fn from_bufread<R: BufRead>(&self, mut br: R) -> Result<Network, NetworkLoaderError> {
        let mut sc = Scanner::new(&mut br);
        let n: usize = sc.next()?;
        if n == 0 {
            return Err(NetworkLoaderError::NonPositiveCount);
        }

        let mut distances = Vec::with_capacity(n);
        for _ in 0..n {
            let mut row = Vec::with_capacity(n);
            for _ in 0..n {
                row.push(sc.next::<f64>()?);
            }
            distances.push(row);
        }

        let mut builder = NetworkBuilder::new().with_config(self.config);
        for i in 0..n {
            let id = NodeIdentifier::new(i);
            let f: f64 = sc.next()?;
            let failure =
                Probability::new(f).map_err(|e| NetworkLoaderError::InvalidProbability(id, e))?;
            builder.add_node(id, failure);
        }

        let h: usize = sc.next()?;
        for _ in 0..h {
            let hub: usize = sc.next()?;
            builder.add_hub(NodeIdentifier::new(hub));
        }

        Ok(builder.with_distances(distances).build()?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Network, NetworkLoaderError> {
        let file = File::open(path).map_err(NetworkLoaderError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Network, NetworkLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Network, NetworkLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

#[derive(Debug)]
struct Scanner<R: BufRead> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    #[inline]
    fn fill_line(&mut self) -> Result<(), NetworkLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self
            .rdr
            .read_line(&mut self.buf)
            .map_err(NetworkLoaderError::Io)?;
        if n == 0 {
            return Err(NetworkLoaderError::UnexpectedEof);
        }
        if let Some(cut) = self.buf.find('#') {
            self.buf.truncate(cut);
        }
        Ok(())
    }

    #[inline]
    fn skip_ws(&mut self) -> Result<(), NetworkLoaderError> {
        loop {
            let bytes = self.buf.as_bytes();
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.buf.len() {
                return Ok(());
            }
            self.fill_line()?;
        }
    }

    #[inline]
    fn next_token(&mut self) -> Result<&str, NetworkLoaderError> {
        self.skip_ws()?;
        let start = self.pos;
        let bytes = self.buf.as_bytes();
        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Ok(&self.buf[start..self.pos])
    }

    #[inline]
    fn next<T>(&mut self) -> Result<T, NetworkLoaderError>
    where
        T: FromStr,
        NetworkLoaderError: From<T::Err>,
    {
        Ok(self.next_token()?.parse::<T>()?)
    }
}
