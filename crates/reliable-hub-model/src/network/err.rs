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

use crate::network::node::NodeIdentifier;
use reliable_hub_core::prelude::InvalidProbabilityError;
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyNetworkError;

impl std::fmt::Display for EmptyNetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The network has no nodes.")
    }
}

impl std::error::Error for EmptyNetworkError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingNodeError {
    id: NodeIdentifier,
}

impl MissingNodeError {
    pub fn new(id: NodeIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> NodeIdentifier {
        self.id
    }
}

impl std::fmt::Display for MissingNodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node identifiers must be contiguous from 0, but {} is missing",
            self.id
        )
    }
}

impl std::error::Error for MissingNodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownHubError {
    id: NodeIdentifier,
}

impl UnknownHubError {
    pub fn new(id: NodeIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> NodeIdentifier {
        self.id
    }
}

impl std::fmt::Display for UnknownHubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hub {} is not a node of the network", self.id)
    }
}

impl std::error::Error for UnknownHubError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DistanceMatrixShapeError {
    expected: usize,
    row: Option<usize>,
    found: usize,
}

impl DistanceMatrixShapeError {
    /// The matrix has `found` rows instead of `expected`.
    pub fn rows(expected: usize, found: usize) -> Self {
        Self {
            expected,
            row: None,
            found,
        }
    }

    /// Row `row` has `found` entries instead of `expected`.
    pub fn columns(expected: usize, row: usize, found: usize) -> Self {
        Self {
            expected,
            row: Some(row),
            found,
        }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn found(&self) -> usize {
        self.found
    }
}

impl std::fmt::Display for DistanceMatrixShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            None => write!(
                f,
                "Distance matrix has {} rows, expected {}",
                self.found, self.expected
            ),
            Some(r) => write!(
                f,
                "Distance matrix row {} has {} entries, expected {}",
                r, self.found, self.expected
            ),
        }
    }
}

impl std::error::Error for DistanceMatrixShapeError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidDistanceError {
    origin: NodeIdentifier,
    destination: NodeIdentifier,
    value: f64,
}

impl InvalidDistanceError {
    pub fn new(origin: NodeIdentifier, destination: NodeIdentifier, value: f64) -> Self {
        Self {
            origin,
            destination,
            value,
        }
    }

    pub fn origin(&self) -> NodeIdentifier {
        self.origin
    }

    pub fn destination(&self) -> NodeIdentifier {
        self.destination
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for InvalidDistanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Distance from {} to {} must be finite and non-negative, got {}",
            self.origin, self.destination, self.value
        )
    }
}

impl std::error::Error for InvalidDistanceError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidAlphaError {
    value: f64,
}

impl InvalidAlphaError {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for InvalidAlphaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid discount factor {:?}. It must be finite and non-negative.",
            self.value
        )
    }
}

impl std::error::Error for InvalidAlphaError {}

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    Empty(EmptyNetworkError),
    MissingNode(MissingNodeError),
    UnknownHub(UnknownHubError),
    DistanceMatrixShape(DistanceMatrixShapeError),
    InvalidDistance(InvalidDistanceError),
    InvalidAlpha(InvalidAlphaError),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::Empty(e) => write!(f, "{}", e),
            NetworkError::MissingNode(e) => write!(f, "{}", e),
            NetworkError::UnknownHub(e) => write!(f, "{}", e),
            NetworkError::DistanceMatrixShape(e) => write!(f, "{}", e),
            NetworkError::InvalidDistance(e) => write!(f, "{}", e),
            NetworkError::InvalidAlpha(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<EmptyNetworkError> for NetworkError {
    fn from(err: EmptyNetworkError) -> Self {
        NetworkError::Empty(err)
    }
}

impl From<MissingNodeError> for NetworkError {
    fn from(err: MissingNodeError) -> Self {
        NetworkError::MissingNode(err)
    }
}

impl From<UnknownHubError> for NetworkError {
    fn from(err: UnknownHubError) -> Self {
        NetworkError::UnknownHub(err)
    }
}

impl From<DistanceMatrixShapeError> for NetworkError {
    fn from(err: DistanceMatrixShapeError) -> Self {
        NetworkError::DistanceMatrixShape(err)
    }
}

impl From<InvalidDistanceError> for NetworkError {
    fn from(err: InvalidDistanceError) -> Self {
        NetworkError::InvalidDistance(err)
    }
}

impl From<InvalidAlphaError> for NetworkError {
    fn from(err: InvalidAlphaError) -> Self {
        NetworkError::InvalidAlpha(err)
    }
}

#[derive(Debug)]
pub enum NetworkLoaderError {
    Io(std::io::Error),
    ParseInt(ParseIntError),
    ParseFloat(ParseFloatError),
    UnexpectedEof,
    NonPositiveCount,
    InvalidProbability(NodeIdentifier, InvalidProbabilityError),
    Network(NetworkError),
}

impl From<std::io::Error> for NetworkLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseIntError> for NetworkLoaderError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl From<ParseFloatError> for NetworkLoaderError {
    fn from(e: ParseFloatError) -> Self {
        Self::ParseFloat(e)
    }
}

impl From<NetworkError> for NetworkLoaderError {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

impl std::fmt::Display for NetworkLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use NetworkLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt(e) => write!(f, "parse-int error: {e}"),
            ParseFloat(e) => write!(f, "parse-float error: {e}"),
            UnexpectedEof => write!(f, "unexpected end of file while parsing network"),
            NonPositiveCount => write!(f, "node count must be positive"),
            InvalidProbability(id, e) => write!(f, "failure probability of {id}: {e}"),
            Network(e) => write!(f, "network error: {e}"),
        }
    }
}

impl std::error::Error for NetworkLoaderError {}
