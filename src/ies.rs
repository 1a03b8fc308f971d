//! Institution (IES) registry.
//!
//! Static configuration for the supported institutions: full legal name,
//! short code, logo asset path, and the grammatical-agreement flag that
//! selects the wording variant of the liability clause.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Static configuration entry for one institution.
#[derive(Debug)]
pub struct IesInfo {
    /// Short code (sigla) used in filenames and in the closing paragraph.
    pub sigla: &'static str,
    /// Full legal name printed on the document header and body.
    pub nome_completo: &'static str,
    /// Logo asset path, relative to the static directory.
    pub logo: &'static str,
    /// True when the full name takes masculine agreement ("ministrado
    /// pelo ..."); the template branches on this, never on the sigla.
    pub artigo_masculino: bool,
}

lazy_static! {
    /// All supported institutions, keyed by sigla.
    pub static ref IES_CONFIG: HashMap<&'static str, IesInfo> = {
        let mut config = HashMap::new();
        config.insert(
            "UNIANDRADE",
            IesInfo {
                sigla: "UNIANDRADE",
                nome_completo: "Centro Universitário Campos de Andrade – UNIANDRADE",
                logo: "logos/logo uni.png",
                artigo_masculino: true,
            },
        );
        config.insert(
            "UNIB",
            IesInfo {
                sigla: "UNIB",
                nome_completo: "Universidade Ibirapuera - UNIB",
                logo: "logos/logo unib.png",
                artigo_masculino: false,
            },
        );
        config.insert(
            "UNISMG",
            IesInfo {
                sigla: "UNISMG",
                nome_completo: "Centro Universitário Santa Maria da Glória - UNISMG",
                logo: "logos/logo smg.png",
                artigo_masculino: false,
            },
        );
        config
    };
}

/// Map a raw IES value to a canonical sigla.
///
/// Known enrollment-system numeric codes become their sigla; anything else
/// is trimmed and upper-cased as-is, leaving membership checking to
/// [`resolve_ies`].
pub fn map_codigo_ies(valor: &str) -> String {
    match valor.trim() {
        "1" => "UNIANDRADE".to_string(),
        "201" => "UNISMG".to_string(),
        "301" => "UNIB".to_string(),
        outro => outro.to_uppercase(),
    }
}

/// Look up an institution by canonical sigla.
pub fn resolve_ies(sigla: &str) -> Option<&'static IesInfo> {
    IES_CONFIG.get(sigla)
}
