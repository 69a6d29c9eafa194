use std::io::BufRead;

/// Kind discriminant stored in every object header
///
/// The store reads this tag before decoding the payload, so callers always
/// get back a typed variant and pattern-match on it instead of inspecting
/// the payload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }

    /// Consume the `<kind> <size>\0` header and return the kind tag
    ///
    /// Leaves the reader positioned at the start of the payload.
    pub fn parse_header(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectKind> {
        let mut kind = Vec::new();
        data_reader.read_until(b' ', &mut kind)?;

        let kind = String::from_utf8(kind)?;
        let kind = kind.trim();

        // skip the size part
        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;

        ObjectKind::try_from(kind)
    }
}

impl TryFrom<&str> for ObjectKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            _ => Err(anyhow::anyhow!("Invalid object kind: {value}")),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_header_returns_kind_and_skips_size() {
        let mut reader = Cursor::new(b"blob 5\0hello".to_vec());
        let kind = ObjectKind::parse_header(&mut reader).unwrap();

        assert_eq!(kind, ObjectKind::Blob);

        let mut rest = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut rest).unwrap();
        assert_eq!(rest, b"hello");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut reader = Cursor::new(b"tag 3\0abc".to_vec());
        assert!(ObjectKind::parse_header(&mut reader).is_err());
    }
}
