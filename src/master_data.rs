/// Static reference lists offered as choices when filling in a report.
///
/// Built once at start-up and handed to whatever needs it; nothing in the
/// query layer depends on these lists.
#[derive(Debug, Clone)]
pub struct MasterData {
    pub accident_types: Vec<&'static str>,
    pub injury_types: Vec<&'static str>,
    pub body_parts: Vec<&'static str>,
    pub immediate_actions: Vec<&'static str>,
    pub severity_levels: Vec<&'static str>,
}

/// The free-text "other" choice present in the accident and injury lists.
pub const OTHER: &str = "Lainnya";

impl Default for MasterData {
    fn default() -> Self {
        Self {
            accident_types: vec![
                "Terjatuh",
                "Tertiban",
                "Terpotong",
                "Tersayat",
                "Tersengat listrik",
                "Terbakar",
                "Terpapar kimia",
                "Tertusuk",
                "Tergores",
                "Tersangkut mesin",
                "Tertimpa",
                "Kontak dengan benda panas",
                "Kontak dengan benda dingin",
                "Gerakan berulang",
                OTHER,
            ],
            injury_types: vec![
                "Luka lecet",
                "Luka sayat",
                "Luka tusuk",
                "Luka bakar",
                "Patah tulang",
                "Dislokasi",
                "Amputasi",
                "Gegar otak",
                "Keracunan",
                "Trauma mata",
                "Trauma telinga",
                "Keseleo",
                "Kram otot",
                "Luka tembus",
                OTHER,
            ],
            body_parts: vec![
                "Kepala",
                "Wajah",
                "Mata",
                "Telinga",
                "Hidung",
                "Mulut",
                "Leher",
                "Bahu",
                "Lengan",
                "Tangan",
                "Jari",
                "Dada",
                "Perut",
                "Punggung",
                "Pinggang",
                "Panggul",
                "Alat kelamin",
                "Paha",
                "Lutut",
                "Betis",
                "Kaki",
                "Seluruh tubuh",
            ],
            immediate_actions: vec![
                "Evakuasi korban",
                "Pemberian P3K",
                "Pengendalian perdarahan",
                "Imobilisasi",
                "Pemadaman api",
                "Pencucian kimia",
                "Pelepasan listrik",
                "Pemanggilan medis",
                "Pengamanan area",
                "Penghentian mesin",
                "Pencatatan bukti",
                "Pelaporan",
            ],
            severity_levels: vec![
                "P3K",
                "Perawatan medis",
                "Hilang waktu kerja",
                "Rawat inap",
                "Cacat permanen",
                "Kematian",
            ],
        }
    }
}

impl MasterData {
    /// Case-insensitive membership check against one of the lists.
    pub fn contains(list: &[&str], value: &str) -> bool {
        list.iter().any(|item| item.eq_ignore_ascii_case(value))
    }

    /// Named lists in display order.
    pub fn lists(&self) -> [(&'static str, &[&'static str]); 5] {
        [
            ("Jenis Kecelakaan", self.accident_types.as_slice()),
            ("Jenis Cedera", self.injury_types.as_slice()),
            ("Bagian Tubuh", self.body_parts.as_slice()),
            ("Tindakan Segera", self.immediate_actions.as_slice()),
            ("Tingkat Keparahan", self.severity_levels.as_slice()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_are_populated() {
        let data = MasterData::default();
        assert_eq!(data.accident_types.len(), 15);
        assert_eq!(data.injury_types.len(), 15);
        assert_eq!(data.body_parts.len(), 22);
        assert_eq!(data.immediate_actions.len(), 12);
        assert_eq!(data.severity_levels.len(), 6);
    }

    #[test]
    fn test_other_choice_present() {
        let data = MasterData::default();
        assert!(MasterData::contains(&data.accident_types, OTHER));
        assert!(MasterData::contains(&data.injury_types, OTHER));
        assert!(!MasterData::contains(&data.body_parts, OTHER));
    }

    #[test]
    fn test_contains_ignores_case() {
        let data = MasterData::default();
        assert!(MasterData::contains(&data.accident_types, "TERBAKAR"));
        assert!(!MasterData::contains(&data.accident_types, "Tenggelam"));
    }

    #[test]
    fn test_lists_are_named() {
        let data = MasterData::default();
        let names: Vec<&str> = data.lists().iter().map(|(name, _)| *name).collect();
        assert_eq!(names[0], "Jenis Kecelakaan");
        assert_eq!(data.lists()[2].1.len(), 22);
    }
}
