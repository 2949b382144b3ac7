//! Static data pools the generators draw from.
//!
//! Pools are independent: the suspect generator shuffles each one separately
//! and assigns round-robin, cycling shorter pools with modulo. Duplication of
//! occupations or descriptions at large suspect counts is expected.

pub const FIRST_NAMES: &[&str] = &[
    "Adelaide", "Bernard", "Celeste", "Desmond", "Eleanor", "Felix", "Genevieve", "Horace",
    "Imogen", "Julian", "Katherine", "Leopold", "Margot", "Nathaniel", "Ottilie", "Percival",
    "Rosalind", "Sebastian", "Theodora", "Ulysses", "Vivienne", "Wendell", "Xenia", "Yves",
];

pub const LAST_NAMES: &[&str] = &[
    "Ashworth", "Blackwood", "Carmichael", "Davenport", "Everhart", "Fairfax", "Greystone",
    "Hollingsworth", "Ironwood", "Jessop", "Kingsley", "Lockhart", "Montague", "Northgate",
    "Ormsby", "Pemberton", "Quillfeather", "Ravenscroft", "Sinclair", "Thorne", "Underhill",
    "Vance", "Whitlock", "Yardley",
];

pub const OCCUPATIONS: &[&str] = &[
    "estate solicitor",
    "retired colonel",
    "concert pianist",
    "antiquities dealer",
    "private physician",
    "society columnist",
    "head butler",
    "stage actress",
    "importer of rare wines",
    "archaeologist",
    "portrait painter",
    "banking heir",
    "governess",
    "racehorse trainer",
    "chemist",
    "ship's captain",
];

pub const SUSPECT_DESCRIPTIONS: &[&str] = &[
    "speaks carefully, as if every sentence were notarized",
    "arrived at the manor a day earlier than anyone expected",
    "keeps checking a pocket watch that has clearly stopped",
    "charming in company, curt the moment a door closes",
    "known to owe money in three counties",
    "wears mourning black regardless of the occasion",
    "laughs a beat too late at every joke",
    "was overheard arguing in the corridor the night before",
    "claims to remember nothing before nine o'clock",
    "has a habit of standing near doorways during conversations",
    "recently returned from a long and unexplained absence",
    "writes letters at all hours and posts none of them",
];

/// Location templates: name, description, whether it is a public room.
pub const LOCATION_DEFS: &[(&str, &str, bool)] = &[
    (
        "Grand Ballroom",
        "chandeliers, a parquet floor, and far too many witnesses",
        true,
    ),
    (
        "Library",
        "floor-to-ceiling shelves and a ladder that squeaks",
        true,
    ),
    (
        "Conservatory",
        "glass walls, orchids, and a damp earth smell",
        true,
    ),
    (
        "Dining Room",
        "a table set for twelve, cleared in a hurry",
        true,
    ),
    (
        "Garden Terrace",
        "flagstones slick with evening rain",
        true,
    ),
    (
        "Billiard Room",
        "green baize, brandy glasses, a window left ajar",
        true,
    ),
    (
        "Study",
        "a locked desk, a cold fireplace, papers out of order",
        false,
    ),
    (
        "Master Bedroom",
        "heavy curtains drawn against the evening",
        false,
    ),
    (
        "Wine Cellar",
        "racks of dusty bottles and a single bare bulb",
        false,
    ),
    (
        "Servants' Quarters",
        "narrow corridors that hear everything",
        false,
    ),
];

pub const SECRET_REASONS: &[&str] = &[
    "an affair neither household suspects",
    "a partnership in a venture that failed badly",
    "letters that would be ruinous if read aloud",
    "a debt settled off the books years ago",
    "an engagement broken without explanation",
    "a shared past under different names",
    "money moved quietly between their accounts",
    "a promise made at a deathbed, never spoken of",
];

/// How many locations a case carries.
pub const LOCATIONS_PER_CASE: usize = 7;
