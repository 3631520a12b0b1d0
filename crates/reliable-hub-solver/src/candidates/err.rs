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

use reliable_hub_model::prelude::NodeIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyHubListError {
    origin: NodeIdentifier,
    destination: NodeIdentifier,
}

impl EmptyHubListError {
    pub fn new(origin: NodeIdentifier, destination: NodeIdentifier) -> Self {
        Self {
            origin,
            destination,
        }
    }

    pub fn origin(&self) -> NodeIdentifier {
        self.origin
    }

    pub fn destination(&self) -> NodeIdentifier {
        self.destination
    }
}

impl std::fmt::Display for EmptyHubListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No candidate hubs for non-hub endpoints {} and {}",
            self.origin, self.destination
        )
    }
}

impl std::error::Error for EmptyHubListError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownNodeError {
    id: NodeIdentifier,
}

impl UnknownNodeError {
    pub fn new(id: NodeIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> NodeIdentifier {
        self.id
    }
}

impl std::fmt::Display for UnknownNodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node {} does not belong to the network", self.id)
    }
}

impl std::error::Error for UnknownNodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotAHubError {
    id: NodeIdentifier,
}

impl NotAHubError {
    pub fn new(id: NodeIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> NodeIdentifier {
        self.id
    }
}

impl std::fmt::Display for NotAHubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Candidate {} is not a hub", self.id)
    }
}

impl std::error::Error for NotAHubError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdenticalEndpointsError {
    id: NodeIdentifier,
}

impl IdenticalEndpointsError {
    pub fn new(id: NodeIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> NodeIdentifier {
        self.id
    }
}

impl std::fmt::Display for IdenticalEndpointsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Origin and destination are both {}", self.id)
    }
}

impl std::error::Error for IdenticalEndpointsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateError {
    EmptyHubList(EmptyHubListError),
    UnknownNode(UnknownNodeError),
    NotAHub(NotAHubError),
    IdenticalEndpoints(IdenticalEndpointsError),
}

impl std::fmt::Display for CandidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateError::EmptyHubList(e) => write!(f, "{}", e),
            CandidateError::UnknownNode(e) => write!(f, "{}", e),
            CandidateError::NotAHub(e) => write!(f, "{}", e),
            CandidateError::IdenticalEndpoints(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CandidateError {}

impl From<EmptyHubListError> for CandidateError {
    fn from(err: EmptyHubListError) -> Self {
        CandidateError::EmptyHubList(err)
    }
}

impl From<UnknownNodeError> for CandidateError {
    fn from(err: UnknownNodeError) -> Self {
        CandidateError::UnknownNode(err)
    }
}

impl From<NotAHubError> for CandidateError {
    fn from(err: NotAHubError) -> Self {
        CandidateError::NotAHub(err)
    }
}

impl From<IdenticalEndpointsError> for CandidateError {
    fn from(err: IdenticalEndpointsError) -> Self {
        CandidateError::IdenticalEndpoints(err)
    }
}
