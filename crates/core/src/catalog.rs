//! Static item catalogs for the mini-games and the hub.

use crate::types::{GameKind, WasteBin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WasteItem {
    pub id: u8,
    pub name: &'static str,
    pub glyph: &'static str,
    pub bin: WasteBin,
    pub fact: &'static str,
}

const fn waste(
    id: u8,
    name: &'static str,
    bin: WasteBin,
    glyph: &'static str,
    fact: &'static str,
) -> WasteItem {
    WasteItem {
        id,
        name,
        glyph,
        bin,
        fact,
    }
}

pub static WASTE_ITEMS: [WasteItem; 15] = [
    waste(1, "Apple Core", WasteBin::Compost, "🍎", "Food waste creates methane gas in landfills!"),
    waste(2, "Plastic Bottle", WasteBin::Recycle, "🧴", "Plastic can take 450 years to decompose!"),
    waste(3, "Pizza Box", WasteBin::Trash, "🍕", "Greasy cardboard can't be recycled!"),
    waste(4, "Glass Jar", WasteBin::Recycle, "🥫", "Glass is 100% recyclable forever!"),
    waste(5, "Banana Peel", WasteBin::Compost, "🍌", "Fruit peels make great compost!"),
    waste(6, "Chip Bag", WasteBin::Trash, "🥖", "Multi-layer packaging is hard to recycle!"),
    waste(7, "Newspaper", WasteBin::Recycle, "📰", "Paper can be recycled 5-7 times!"),
    waste(8, "Coffee Grounds", WasteBin::Compost, "☕", "Coffee grounds are rich in nitrogen!"),
    waste(9, "Battery", WasteBin::Trash, "🔋", "Batteries contain toxic chemicals!"),
    waste(10, "Cardboard", WasteBin::Recycle, "📦", "Cardboard recycling saves trees!"),
    waste(11, "Egg Shells", WasteBin::Compost, "🥚", "Eggshells add calcium to compost!"),
    waste(12, "Styrofoam", WasteBin::Trash, "🧊", "Styrofoam never fully decomposes!"),
    waste(13, "Aluminum Can", WasteBin::Recycle, "🥫", "Aluminum can be recycled infinitely!"),
    waste(14, "Tea Leaves", WasteBin::Compost, "🍃", "Tea leaves enrich soil quality!"),
    waste(15, "Plastic Wrap", WasteBin::Trash, "🧻", "Plastic film clogs recycling machines!"),
];

/// Pollutant glyphs the cleanup spawner chooses from.
pub static POLLUTANTS: [&str; 10] = ["🗑️", "🚮", "🍂", "🥤", "📄", "🔋", "🧃", "🍫", "📱", "💡"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryCard {
    pub pair_id: u8,
    pub glyph: &'static str,
    pub name: &'static str,
}

pub static MEMORY_CARDS: [MemoryCard; 6] = [
    MemoryCard { pair_id: 1, glyph: "🌍", name: "Earth" },
    MemoryCard { pair_id: 2, glyph: "🌱", name: "Seed" },
    MemoryCard { pair_id: 3, glyph: "💧", name: "Water" },
    MemoryCard { pair_id: 4, glyph: "♻️", name: "Recycle" },
    MemoryCard { pair_id: 5, glyph: "🌞", name: "Sun" },
    MemoryCard { pair_id: 6, glyph: "🌳", name: "Tree" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Index into `options` of the correct answer.
    pub answer: usize,
}

pub static TRIVIA_QUESTIONS: [Question; 10] = [
    Question {
        prompt: "Which gas do plants absorb during photosynthesis?",
        options: &["Oxygen", "Carbon dioxide", "Nitrogen", "Hydrogen"],
        answer: 1,
    },
    Question {
        prompt: "What type of waste belongs in a compost bin?",
        options: &["Fruit peels", "Plastic wrap", "Glass shards"],
        answer: 0,
    },
    Question {
        prompt: "The practice of using less water is called...",
        options: &["Hydro-mining", "Water conservation", "Desalination"],
        answer: 1,
    },
    Question {
        prompt: "Which is a renewable energy source?",
        options: &["Coal", "Natural gas", "Solar"],
        answer: 2,
    },
    Question {
        prompt: "Best way to cut e-waste at school?",
        options: &["Throw it with regular trash", "Repair or donate old devices", "Burn it"],
        answer: 1,
    },
    Question {
        prompt: "Planting trees mainly helps reduce which gas?",
        options: &["Carbon dioxide", "Helium", "Chlorine"],
        answer: 0,
    },
    Question {
        prompt: "What symbol means an item can be recycled?",
        options: &["Warning sign", "Three chasing arrows", "No-entry sign"],
        answer: 1,
    },
    Question {
        prompt: "Which practice saves the most paper at school?",
        options: &["Single-sided prints", "Digital submissions", "Extra photocopies for backup"],
        answer: 1,
    },
    Question {
        prompt: "Wet waste should be...",
        options: &["Mixed with plastics", "Sent to composting", "Buried in a playground"],
        answer: 1,
    },
    Question {
        prompt: "Which habit lowers your carbon footprint?",
        options: &["Taking stairs for 1-2 floors", "Letting the tap run", "Daily single-use bottles"],
        answer: 0,
    },
];

/// One tile on the game hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HubEntry {
    pub game: GameKind,
    pub description: &'static str,
    /// Advertised XP label shown on the tile.
    pub xp_label: u32,
}

pub static HUB_ENTRIES: [HubEntry; 4] = [
    HubEntry {
        game: GameKind::WasteSorter,
        description: "Sort waste into recycle, compost, or trash!",
        xp_label: 20,
    },
    HubEntry {
        game: GameKind::EcoMemory,
        description: "Match environmental pairs!",
        xp_label: 25,
    },
    HubEntry {
        game: GameKind::PollutionCleanup,
        description: "Clean up the polluted environment!",
        xp_label: 30,
    },
    HubEntry {
        game: GameKind::TriviaQuiz,
        description: "Answer ten eco questions; a flawless round earns XP!",
        xp_label: 5,
    },
];
