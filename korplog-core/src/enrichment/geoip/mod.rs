use maxminddb::{Mmap, PathElement, Reader};
use std::net::IpAddr;
use std::path::Path;

/// A MaxMind country (or city) database.
pub struct CountryDb {
    reader: Reader<Mmap>,
}

impl CountryDb {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        // The file is mapped read-only and nothing here writes to it.
        let reader = unsafe { Reader::open_mmap(path)? };
        Ok(Self { reader })
    }

    /// ISO 3166-1 alpha-2 code of the country `ip` is registered in.
    pub fn country_code(&self, ip: IpAddr) -> Option<String> {
        let lookup = self.reader.lookup(ip).ok()?;

        lookup
            .decode_path::<String>(&[PathElement::Key("country"), PathElement::Key("iso_code")])
            .ok()
            .flatten()
    }
}
