use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveRecord, ManifestEntry, TsvColumn, TsvRow, entry};
use crate::vocabulary::IlluminaModel;

/// `<PLATFORM><ILLUMINA><INSTRUMENT_MODEL>..</INSTRUMENT_MODEL></ILLUMINA></PLATFORM>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "ILLUMINA")]
    Illumina {
        #[serde(rename = "INSTRUMENT_MODEL")]
        instrument_model: IlluminaModel,
    },
}

impl Platform {
    pub fn illumina(instrument_model: IlluminaModel) -> Self {
        Platform::Illumina { instrument_model }
    }

    /// Element name of the active platform variant.
    pub fn platform_name(&self) -> &'static str {
        match self {
            Platform::Illumina { .. } => "ILLUMINA",
        }
    }

    pub fn instrument_model(&self) -> &'static str {
        match self {
            Platform::Illumina { instrument_model } => instrument_model.as_str(),
        }
    }
}

impl ArchiveRecord for Platform {
    fn manifest(&self) -> Vec<ManifestEntry> {
        vec![
            entry("PLATFORM", self.platform_name()),
            entry("INSTRUMENT", self.instrument_model()),
        ]
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        vec![TsvRow::new().with(TsvColumn::InstrumentModel, self.instrument_model())]
    }
}
