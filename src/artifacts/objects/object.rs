use crate::artifacts::objects::digest::Digest;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn kind(&self) -> ObjectKind;

    // TODO: Cache the serialization and digest to avoid recomputing them
    fn digest(&self) -> Result<Digest> {
        let content = self.serialize()?;
        Ok(Digest::over(&content))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.digest()?.to_path())
    }
}
