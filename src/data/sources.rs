use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{DATA_DIR, DATA_FILES};
use crate::data::csv_source::load_table;
use crate::data::table::Table;

/// Loads every dataset the vital signs need from one directory.
/// Each loader returns `Ok(None)` when its file is absent.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub dir: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self::new(DATA_DIR)
    }
}

impl DataSources {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    fn load(&self, file_name: &str) -> Result<Option<Table>> {
        load_table(&self.path_of(file_name))
    }

    pub fn load_treaties(&self) -> Result<Option<Table>> {
        self.load(DATA_FILES.treaties)
    }

    pub fn load_conflict(&self) -> Result<Option<Table>> {
        self.load(DATA_FILES.conflict)
    }

    /// (news, publications, conflict) yearly streams for the synergy index.
    pub fn load_synergy_streams(&self) -> Result<(Option<Table>, Option<Table>, Option<Table>)> {
        Ok((
            self.load(DATA_FILES.synergy_news)?,
            self.load(DATA_FILES.synergy_pubs)?,
            self.load(DATA_FILES.synergy_conflict)?,
        ))
    }

    /// (news, wikipedia) daily streams for GWI.
    pub fn load_gwi_streams(&self) -> Result<(Option<Table>, Option<Table>)> {
        Ok((
            self.load(DATA_FILES.gwi_news)?,
            self.load(DATA_FILES.gwi_wiki)?,
        ))
    }

    pub fn load_co2_target(&self) -> Result<Option<Table>> {
        self.load(DATA_FILES.co2_target)
    }

    pub fn load_co2_actual(&self) -> Result<Option<Table>> {
        self.load(DATA_FILES.co2_actual)
    }

    pub fn load_skill(&self) -> Result<Option<Table>> {
        self.load(DATA_FILES.skill)
    }
}
