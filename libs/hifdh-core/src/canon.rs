//! Static canon reference data: the 114 surahs and the 30 juz boundaries.
//!
//! These tables are the single source of truth for boundary correctness.
//! Range resolution copies juz boundaries verbatim and never recomputes
//! verse counts.

use crate::types::JuzBoundary;

/// One chapter of the canon, with its fixed verse count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurahInfo {
    pub id: u16,
    /// Arabic name.
    pub name: &'static str,
    /// Transliterated name.
    pub english_name: &'static str,
    pub total_verses: u16,
}

/// Number of surahs in the canon.
pub const SURAH_COUNT: u16 = 114;

/// Number of juz divisions.
pub const JUZ_COUNT: u8 = 30;

/// Total verses across the whole canon (sum of all surah verse counts).
pub const TOTAL_VERSES: u32 = 6236;

/// All 114 surahs, ordered by id.
pub static SURAHS: [SurahInfo; 114] = [
    SurahInfo { id: 1, name: "الفاتحة", english_name: "Al-Fatiha", total_verses: 7 },
    SurahInfo { id: 2, name: "البقرة", english_name: "Al-Baqarah", total_verses: 286 },
    SurahInfo { id: 3, name: "آل عمران", english_name: "Aal-Imran", total_verses: 200 },
    SurahInfo { id: 4, name: "النساء", english_name: "An-Nisa", total_verses: 176 },
    SurahInfo { id: 5, name: "المائدة", english_name: "Al-Ma'idah", total_verses: 120 },
    SurahInfo { id: 6, name: "الأنعام", english_name: "Al-An'am", total_verses: 165 },
    SurahInfo { id: 7, name: "الأعراف", english_name: "Al-A'raf", total_verses: 206 },
    SurahInfo { id: 8, name: "الأنفال", english_name: "Al-Anfal", total_verses: 75 },
    SurahInfo { id: 9, name: "التوبة", english_name: "At-Tawbah", total_verses: 129 },
    SurahInfo { id: 10, name: "يونس", english_name: "Yunus", total_verses: 109 },
    SurahInfo { id: 11, name: "هود", english_name: "Hud", total_verses: 123 },
    SurahInfo { id: 12, name: "يوسف", english_name: "Yusuf", total_verses: 111 },
    SurahInfo { id: 13, name: "الرعد", english_name: "Ar-Ra'd", total_verses: 43 },
    SurahInfo { id: 14, name: "إبراهيم", english_name: "Ibrahim", total_verses: 52 },
    SurahInfo { id: 15, name: "الحجر", english_name: "Al-Hijr", total_verses: 99 },
    SurahInfo { id: 16, name: "النحل", english_name: "An-Nahl", total_verses: 128 },
    SurahInfo { id: 17, name: "الإسراء", english_name: "Al-Isra", total_verses: 111 },
    SurahInfo { id: 18, name: "الكهف", english_name: "Al-Kahf", total_verses: 110 },
    SurahInfo { id: 19, name: "مريم", english_name: "Maryam", total_verses: 98 },
    SurahInfo { id: 20, name: "طه", english_name: "Taha", total_verses: 135 },
    SurahInfo { id: 21, name: "الأنبياء", english_name: "Al-Anbiya", total_verses: 112 },
    SurahInfo { id: 22, name: "الحج", english_name: "Al-Hajj", total_verses: 78 },
    SurahInfo { id: 23, name: "المؤمنون", english_name: "Al-Mu'minun", total_verses: 118 },
    SurahInfo { id: 24, name: "النور", english_name: "An-Nur", total_verses: 64 },
    SurahInfo { id: 25, name: "الفرقان", english_name: "Al-Furqan", total_verses: 77 },
    SurahInfo { id: 26, name: "الشعراء", english_name: "Ash-Shu'ara", total_verses: 227 },
    SurahInfo { id: 27, name: "النمل", english_name: "An-Naml", total_verses: 93 },
    SurahInfo { id: 28, name: "القصص", english_name: "Al-Qasas", total_verses: 88 },
    SurahInfo { id: 29, name: "العنكبوت", english_name: "Al-Ankabut", total_verses: 69 },
    SurahInfo { id: 30, name: "الروم", english_name: "Ar-Rum", total_verses: 60 },
    SurahInfo { id: 31, name: "لقمان", english_name: "Luqman", total_verses: 34 },
    SurahInfo { id: 32, name: "السجدة", english_name: "As-Sajdah", total_verses: 30 },
    SurahInfo { id: 33, name: "الأحزاب", english_name: "Al-Ahzab", total_verses: 73 },
    SurahInfo { id: 34, name: "سبأ", english_name: "Saba", total_verses: 54 },
    SurahInfo { id: 35, name: "فاطر", english_name: "Fatir", total_verses: 45 },
    SurahInfo { id: 36, name: "يس", english_name: "Ya-Sin", total_verses: 83 },
    SurahInfo { id: 37, name: "الصافات", english_name: "As-Saffat", total_verses: 182 },
    SurahInfo { id: 38, name: "ص", english_name: "Sad", total_verses: 88 },
    SurahInfo { id: 39, name: "الزمر", english_name: "Az-Zumar", total_verses: 75 },
    SurahInfo { id: 40, name: "غافر", english_name: "Ghafir", total_verses: 85 },
    SurahInfo { id: 41, name: "فصلت", english_name: "Fussilat", total_verses: 54 },
    SurahInfo { id: 42, name: "الشورى", english_name: "Ash-Shura", total_verses: 53 },
    SurahInfo { id: 43, name: "الزخرف", english_name: "Az-Zukhruf", total_verses: 89 },
    SurahInfo { id: 44, name: "الدخان", english_name: "Ad-Dukhan", total_verses: 59 },
    SurahInfo { id: 45, name: "الجاثية", english_name: "Al-Jathiyah", total_verses: 37 },
    SurahInfo { id: 46, name: "الأحقاف", english_name: "Al-Ahqaf", total_verses: 35 },
    SurahInfo { id: 47, name: "محمد", english_name: "Muhammad", total_verses: 38 },
    SurahInfo { id: 48, name: "الفتح", english_name: "Al-Fath", total_verses: 29 },
    SurahInfo { id: 49, name: "الحجرات", english_name: "Al-Hujurat", total_verses: 18 },
    SurahInfo { id: 50, name: "ق", english_name: "Qaf", total_verses: 45 },
    SurahInfo { id: 51, name: "الذاريات", english_name: "Adh-Dhariyat", total_verses: 60 },
    SurahInfo { id: 52, name: "الطور", english_name: "At-Tur", total_verses: 49 },
    SurahInfo { id: 53, name: "النجم", english_name: "An-Najm", total_verses: 62 },
    SurahInfo { id: 54, name: "القمر", english_name: "Al-Qamar", total_verses: 55 },
    SurahInfo { id: 55, name: "الرحمن", english_name: "Ar-Rahman", total_verses: 78 },
    SurahInfo { id: 56, name: "الواقعة", english_name: "Al-Waqi'ah", total_verses: 96 },
    SurahInfo { id: 57, name: "الحديد", english_name: "Al-Hadid", total_verses: 29 },
    SurahInfo { id: 58, name: "المجادلة", english_name: "Al-Mujadila", total_verses: 22 },
    SurahInfo { id: 59, name: "الحشر", english_name: "Al-Hashr", total_verses: 24 },
    SurahInfo { id: 60, name: "الممتحنة", english_name: "Al-Mumtahanah", total_verses: 13 },
    SurahInfo { id: 61, name: "الصف", english_name: "As-Saff", total_verses: 14 },
    SurahInfo { id: 62, name: "الجمعة", english_name: "Al-Jumu'ah", total_verses: 11 },
    SurahInfo { id: 63, name: "المنافقون", english_name: "Al-Munafiqun", total_verses: 11 },
    SurahInfo { id: 64, name: "التغابن", english_name: "At-Taghabun", total_verses: 18 },
    SurahInfo { id: 65, name: "الطلاق", english_name: "At-Talaq", total_verses: 12 },
    SurahInfo { id: 66, name: "التحريم", english_name: "At-Tahrim", total_verses: 12 },
    SurahInfo { id: 67, name: "الملك", english_name: "Al-Mulk", total_verses: 30 },
    SurahInfo { id: 68, name: "القلم", english_name: "Al-Qalam", total_verses: 52 },
    SurahInfo { id: 69, name: "الحاقة", english_name: "Al-Haqqah", total_verses: 52 },
    SurahInfo { id: 70, name: "المعارج", english_name: "Al-Ma'arij", total_verses: 44 },
    SurahInfo { id: 71, name: "نوح", english_name: "Nuh", total_verses: 28 },
    SurahInfo { id: 72, name: "الجن", english_name: "Al-Jinn", total_verses: 28 },
    SurahInfo { id: 73, name: "المزمل", english_name: "Al-Muzzammil", total_verses: 20 },
    SurahInfo { id: 74, name: "المدثر", english_name: "Al-Muddaththir", total_verses: 56 },
    SurahInfo { id: 75, name: "القيامة", english_name: "Al-Qiyamah", total_verses: 40 },
    SurahInfo { id: 76, name: "الإنسان", english_name: "Al-Insan", total_verses: 31 },
    SurahInfo { id: 77, name: "المرسلات", english_name: "Al-Mursalat", total_verses: 50 },
    SurahInfo { id: 78, name: "النبأ", english_name: "An-Naba", total_verses: 40 },
    SurahInfo { id: 79, name: "النازعات", english_name: "An-Nazi'at", total_verses: 46 },
    SurahInfo { id: 80, name: "عبس", english_name: "Abasa", total_verses: 42 },
    SurahInfo { id: 81, name: "التكوير", english_name: "At-Takwir", total_verses: 29 },
    SurahInfo { id: 82, name: "الانفطار", english_name: "Al-Infitar", total_verses: 19 },
    SurahInfo { id: 83, name: "المطففين", english_name: "Al-Mutaffifin", total_verses: 36 },
    SurahInfo { id: 84, name: "الانشقاق", english_name: "Al-Inshiqaq", total_verses: 25 },
    SurahInfo { id: 85, name: "البروج", english_name: "Al-Buruj", total_verses: 22 },
    SurahInfo { id: 86, name: "الطارق", english_name: "At-Tariq", total_verses: 17 },
    SurahInfo { id: 87, name: "الأعلى", english_name: "Al-A'la", total_verses: 19 },
    SurahInfo { id: 88, name: "الغاشية", english_name: "Al-Ghashiyah", total_verses: 26 },
    SurahInfo { id: 89, name: "الفجر", english_name: "Al-Fajr", total_verses: 30 },
    SurahInfo { id: 90, name: "البلد", english_name: "Al-Balad", total_verses: 20 },
    SurahInfo { id: 91, name: "الشمس", english_name: "Ash-Shams", total_verses: 15 },
    SurahInfo { id: 92, name: "الليل", english_name: "Al-Layl", total_verses: 21 },
    SurahInfo { id: 93, name: "الضحى", english_name: "Ad-Duha", total_verses: 11 },
    SurahInfo { id: 94, name: "الشرح", english_name: "Ash-Sharh", total_verses: 8 },
    SurahInfo { id: 95, name: "التين", english_name: "At-Tin", total_verses: 8 },
    SurahInfo { id: 96, name: "العلق", english_name: "Al-Alaq", total_verses: 19 },
    SurahInfo { id: 97, name: "القدر", english_name: "Al-Qadr", total_verses: 5 },
    SurahInfo { id: 98, name: "البينة", english_name: "Al-Bayyinah", total_verses: 8 },
    SurahInfo { id: 99, name: "الزلزلة", english_name: "Az-Zalzalah", total_verses: 8 },
    SurahInfo { id: 100, name: "العاديات", english_name: "Al-Adiyat", total_verses: 11 },
    SurahInfo { id: 101, name: "القارعة", english_name: "Al-Qari'ah", total_verses: 11 },
    SurahInfo { id: 102, name: "التكاثر", english_name: "At-Takathur", total_verses: 8 },
    SurahInfo { id: 103, name: "العصر", english_name: "Al-Asr", total_verses: 3 },
    SurahInfo { id: 104, name: "الهمزة", english_name: "Al-Humazah", total_verses: 9 },
    SurahInfo { id: 105, name: "الفيل", english_name: "Al-Fil", total_verses: 5 },
    SurahInfo { id: 106, name: "قريش", english_name: "Quraysh", total_verses: 4 },
    SurahInfo { id: 107, name: "الماعون", english_name: "Al-Ma'un", total_verses: 7 },
    SurahInfo { id: 108, name: "الكوثر", english_name: "Al-Kawthar", total_verses: 3 },
    SurahInfo { id: 109, name: "الكافرون", english_name: "Al-Kafirun", total_verses: 6 },
    SurahInfo { id: 110, name: "النصر", english_name: "An-Nasr", total_verses: 3 },
    SurahInfo { id: 111, name: "المسد", english_name: "Al-Masad", total_verses: 5 },
    SurahInfo { id: 112, name: "الإخلاص", english_name: "Al-Ikhlas", total_verses: 4 },
    SurahInfo { id: 113, name: "الفلق", english_name: "Al-Falaq", total_verses: 5 },
    SurahInfo { id: 114, name: "الناس", english_name: "An-Nas", total_verses: 6 },
];

/// The 30 juz boundaries. Contiguous: each boundary's end immediately
/// precedes the next boundary's start in surah/verse order.
pub static JUZ_BOUNDARIES: [JuzBoundary; 30] = [
    JuzBoundary { juz: 1, start_surah: 1, start_ayah: 1, end_surah: 2, end_ayah: 141 },
    JuzBoundary { juz: 2, start_surah: 2, start_ayah: 142, end_surah: 2, end_ayah: 252 },
    JuzBoundary { juz: 3, start_surah: 2, start_ayah: 253, end_surah: 3, end_ayah: 92 },
    JuzBoundary { juz: 4, start_surah: 3, start_ayah: 93, end_surah: 4, end_ayah: 23 },
    JuzBoundary { juz: 5, start_surah: 4, start_ayah: 24, end_surah: 4, end_ayah: 147 },
    JuzBoundary { juz: 6, start_surah: 4, start_ayah: 148, end_surah: 5, end_ayah: 81 },
    JuzBoundary { juz: 7, start_surah: 5, start_ayah: 82, end_surah: 6, end_ayah: 110 },
    JuzBoundary { juz: 8, start_surah: 6, start_ayah: 111, end_surah: 7, end_ayah: 87 },
    JuzBoundary { juz: 9, start_surah: 7, start_ayah: 88, end_surah: 8, end_ayah: 40 },
    JuzBoundary { juz: 10, start_surah: 8, start_ayah: 41, end_surah: 9, end_ayah: 92 },
    JuzBoundary { juz: 11, start_surah: 9, start_ayah: 93, end_surah: 11, end_ayah: 5 },
    JuzBoundary { juz: 12, start_surah: 11, start_ayah: 6, end_surah: 12, end_ayah: 52 },
    JuzBoundary { juz: 13, start_surah: 12, start_ayah: 53, end_surah: 14, end_ayah: 52 },
    JuzBoundary { juz: 14, start_surah: 15, start_ayah: 1, end_surah: 16, end_ayah: 128 },
    JuzBoundary { juz: 15, start_surah: 17, start_ayah: 1, end_surah: 18, end_ayah: 74 },
    JuzBoundary { juz: 16, start_surah: 18, start_ayah: 75, end_surah: 20, end_ayah: 135 },
    JuzBoundary { juz: 17, start_surah: 21, start_ayah: 1, end_surah: 22, end_ayah: 78 },
    JuzBoundary { juz: 18, start_surah: 23, start_ayah: 1, end_surah: 25, end_ayah: 20 },
    JuzBoundary { juz: 19, start_surah: 25, start_ayah: 21, end_surah: 27, end_ayah: 55 },
    JuzBoundary { juz: 20, start_surah: 27, start_ayah: 56, end_surah: 29, end_ayah: 45 },
    JuzBoundary { juz: 21, start_surah: 29, start_ayah: 46, end_surah: 33, end_ayah: 30 },
    JuzBoundary { juz: 22, start_surah: 33, start_ayah: 31, end_surah: 36, end_ayah: 27 },
    JuzBoundary { juz: 23, start_surah: 36, start_ayah: 28, end_surah: 39, end_ayah: 31 },
    JuzBoundary { juz: 24, start_surah: 39, start_ayah: 32, end_surah: 41, end_ayah: 46 },
    JuzBoundary { juz: 25, start_surah: 41, start_ayah: 47, end_surah: 45, end_ayah: 37 },
    JuzBoundary { juz: 26, start_surah: 46, start_ayah: 1, end_surah: 51, end_ayah: 30 },
    JuzBoundary { juz: 27, start_surah: 51, start_ayah: 31, end_surah: 57, end_ayah: 29 },
    JuzBoundary { juz: 28, start_surah: 58, start_ayah: 1, end_surah: 66, end_ayah: 12 },
    JuzBoundary { juz: 29, start_surah: 67, start_ayah: 1, end_surah: 77, end_ayah: 50 },
    JuzBoundary { juz: 30, start_surah: 78, start_ayah: 1, end_surah: 114, end_ayah: 6 },
];

/// Look up a surah by id (1-114).
pub fn surah(id: u16) -> Option<&'static SurahInfo> {
    if (1..=SURAH_COUNT).contains(&id) {
        Some(&SURAHS[(id - 1) as usize])
    } else {
        None
    }
}

/// Look up a juz boundary by juz number (1-30).
pub fn juz_boundary(juz: u8) -> Option<&'static JuzBoundary> {
    if (1..=JUZ_COUNT).contains(&juz) {
        Some(&JUZ_BOUNDARIES[(juz - 1) as usize])
    } else {
        None
    }
}

/// Absolute 1-based verse index across the whole canon, used to address
/// audio and text resources. Returns `None` for out-of-range positions.
pub fn global_ayah_number(surah_id: u16, ayah: u16) -> Option<u32> {
    let s = surah(surah_id)?;
    if ayah < 1 || ayah > s.total_verses {
        return None;
    }
    let prior: u32 = SURAHS[..(surah_id - 1) as usize]
        .iter()
        .map(|s| s.total_verses as u32)
        .sum();
    Some(prior + ayah as u32)
}
