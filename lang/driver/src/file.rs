//! Where PENMAN text comes from and goes to.

use crate::{codec::PenmanCodec, err::*};
use derive_more::From;
use penman_syntax::{Graph, Tree};
use std::{io, path::PathBuf};

/// A source of PENMAN text.
#[derive(From, Debug, Clone)]
pub enum Input {
    File(File),
    Text(String),
}

impl Input {
    pub fn load(self) -> Result<Loaded> {
        match self {
            | Input::File(file) => file.load(),
            | Input::Text(source) => Ok(Loaded { path: None, source }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct File {
    pub path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        File { path: path.into() }
    }
    pub fn load(self) -> Result<Loaded> {
        let File { path } = self;
        let source = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            | io::ErrorKind::NotFound => PenmanError::FileNotFound(path.clone()),
            | _ => PenmanError::Io(e),
        })?;
        Ok(Loaded { path: Some(path), source })
    }
}

/// Text read into memory, ready to be decoded.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub path: Option<PathBuf>,
    pub source: String,
}

impl Loaded {
    pub fn parse(&self, codec: &PenmanCodec) -> Result<Vec<Tree>> {
        codec.iterparse(&self.source, self.path.clone()).collect()
    }
    pub fn decode(&self, codec: &PenmanCodec) -> Result<Vec<Graph>> {
        codec.iterdecode(&self.source, self.path.clone()).collect()
    }
}
