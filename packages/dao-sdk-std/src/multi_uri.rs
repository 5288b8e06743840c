//! Comma separated metadata links and IPFS content identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

const IPFS_SCHEME: &str = "ipfs://";

/// CIDv0 (`Qm` base58) and the base32, base58btc and base16 multibase forms of CIDv1.
static IPFS_CID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(Qm[1-9A-HJ-NP-Za-km-z]{44,}|b[A-Za-z2-7]{58,}|B[A-Z2-7]{58,}|z[1-9A-HJ-NP-Za-km-z]{48,}|F[0-9A-F]{50,})$",
    )
    .expect("the CID pattern is valid")
});

pub fn is_ipfs_cid(value: &str) -> bool {
    IPFS_CID.is_match(value)
}

/// A location on IPFS: the content identifier plus an optional path below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpfsLocation<'a> {
    pub cid: &'a str,
    pub path: &'a str,
}

/// A list of alternative URIs for the same document, e.g. `ipfs://<cid>,https://host/doc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiUri {
    items: Vec<String>,
}

impl MultiUri {
    pub fn new(value: &str) -> Self {
        Self {
            items: value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The first item that refers to IPFS content. The path drops any query or fragment.
    pub fn ipfs(&self) -> Option<IpfsLocation<'_>> {
        self.items.iter().find_map(|item| {
            let item = item.as_str();
            let item = item.strip_prefix(IPFS_SCHEME).unwrap_or(item);
            let (cid, rest) = match item.find('/') {
                Some(idx) => item.split_at(idx),
                None => (item, ""),
            };
            if !is_ipfs_cid(cid) {
                return None;
            }

            let end = rest.find(['?', '#']).unwrap_or(rest.len());
            Some(IpfsLocation {
                cid,
                path: &rest[..end],
            })
        })
    }

    pub fn ipfs_cid(&self) -> Option<&str> {
        self.ipfs().map(|location| location.cid)
    }

    pub fn http(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(String::as_str)
            .filter(|item| item.starts_with("http://") || item.starts_with("https://"))
            .collect()
    }
}

/// Extracts the IPFS CID from a metadata link.
pub fn resolve_ipfs_cid(value: &str) -> Result<String, Error> {
    MultiUri::new(value)
        .ipfs_cid()
        .map(String::from)
        .ok_or_else(|| Error::InvalidCid(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_err, assert_ok, assert_some};

    const CID_V0: &str = "QmXhJawTJ3PkoKMyF3a4D89zybAHjpcGivkb7F1NkHAjpo";
    const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
    const HTTP_URI: &str = "https://example.org/metadata.json";

    #[test]
    fn cid_formats() {
        assert!(is_ipfs_cid(CID_V0));
        assert!(is_ipfs_cid(CID_V1));
        assert!(!is_ipfs_cid(""));
        assert!(!is_ipfs_cid("Qm"));
        assert!(!is_ipfs_cid("QmXhJawTJ3PkoKMyF3a4D89zybAHjpcGivkb7F1NkHAjp"));
        assert!(!is_ipfs_cid("QmXhJawTJ3PkoKMyF3a4D89zybAHjpcGivkb7F1NkHAj0o"));
        assert!(!is_ipfs_cid("bafybeig"));
        assert!(!is_ipfs_cid(&format!(" {CID_V0}")));
        assert!(!is_ipfs_cid(&format!("{CID_V0}/path")));
        assert!(!is_ipfs_cid(&CID_V1.replace('a', "1")));
        assert!(is_ipfs_cid(&CID_V1.to_uppercase()));
        assert!(is_ipfs_cid(&format!("F{}", "0A".repeat(25))));
        assert!(!is_ipfs_cid(&format!("F{}", "0a".repeat(25))));
    }

    #[test]
    fn http_and_ipfs_items() {
        let uri = MultiUri::new(&format!("ipfs://{CID_V0},{HTTP_URI}"));
        assert_eq!(uri.http(), vec![HTTP_URI]);
        assert_eq!(assert_some!(uri.ipfs()).cid, CID_V0);
        assert_eq!(uri.ipfs_cid(), Some(CID_V0));
    }

    #[test]
    fn bare_cid() {
        let uri = MultiUri::new(CID_V1);
        assert!(uri.http().is_empty());
        assert_eq!(uri.ipfs(), Some(IpfsLocation { cid: CID_V1, path: "" }));
    }

    #[test]
    fn cid_with_path() {
        for value in [
            format!("ipfs://{CID_V0}/some/path"),
            format!("{CID_V0}/some/path?query=1"),
            format!("{CID_V0}/some/path#anchor"),
        ] {
            let uri = MultiUri::new(&value);
            assert_eq!(
                uri.ipfs(),
                Some(IpfsLocation {
                    cid: CID_V0,
                    path: "/some/path"
                })
            );
        }
    }

    #[test]
    fn only_http_items() {
        let uri = MultiUri::new(&format!("{HTTP_URI}/1,{HTTP_URI}/2,{HTTP_URI}/3"));
        assert_eq!(uri.http().len(), 3);
        assert_eq!(uri.items().len(), 3);
        assert_eq!(uri.ipfs(), None);
        assert_eq!(uri.ipfs_cid(), None);
    }

    #[test]
    fn resolve_cid() {
        assert_eq!(
            assert_ok!(resolve_ipfs_cid(&format!("ipfs://{CID_V0}"))),
            CID_V0
        );
        assert_err!(
            resolve_ipfs_cid("ipfs://1234"),
            Error::InvalidCid("ipfs://1234".into())
        );
        assert_err!(resolve_ipfs_cid(""), Error::InvalidCid(String::new()));
    }
}
