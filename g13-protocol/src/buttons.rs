//! Button vocabulary shared by the decoder, the navigation layer and
//! profile mappings

/// Every physical button on the G13
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    G8,
    G9,
    G10,
    G11,
    G12,
    G13,
    G14,
    G15,
    G16,
    G17,
    G18,
    G19,
    G20,
    G21,
    G22,
    /// Backlight/back key above the LCD
    Bd,
    /// LCD soft keys
    L1,
    L2,
    L3,
    L4,
    /// Mode keys
    M1,
    M2,
    M3,
    /// Macro record key
    Mr,
    /// Thumb keys next to the stick
    Left,
    Down,
    /// Thumbstick click
    Stick,
}

/// Number of buttons in the vocabulary
pub const BUTTON_COUNT: usize = 34;

impl ButtonId {
    /// All buttons in index order
    pub const ALL: [ButtonId; BUTTON_COUNT] = [
        ButtonId::G1,
        ButtonId::G2,
        ButtonId::G3,
        ButtonId::G4,
        ButtonId::G5,
        ButtonId::G6,
        ButtonId::G7,
        ButtonId::G8,
        ButtonId::G9,
        ButtonId::G10,
        ButtonId::G11,
        ButtonId::G12,
        ButtonId::G13,
        ButtonId::G14,
        ButtonId::G15,
        ButtonId::G16,
        ButtonId::G17,
        ButtonId::G18,
        ButtonId::G19,
        ButtonId::G20,
        ButtonId::G21,
        ButtonId::G22,
        ButtonId::Bd,
        ButtonId::L1,
        ButtonId::L2,
        ButtonId::L3,
        ButtonId::L4,
        ButtonId::M1,
        ButtonId::M2,
        ButtonId::M3,
        ButtonId::Mr,
        ButtonId::Left,
        ButtonId::Down,
        ButtonId::Stick,
    ];

    /// Stable index (0..BUTTON_COUNT)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a button by its index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical name used in profiles and logs
    pub fn name(self) -> &'static str {
        match self {
            ButtonId::G1 => "G1",
            ButtonId::G2 => "G2",
            ButtonId::G3 => "G3",
            ButtonId::G4 => "G4",
            ButtonId::G5 => "G5",
            ButtonId::G6 => "G6",
            ButtonId::G7 => "G7",
            ButtonId::G8 => "G8",
            ButtonId::G9 => "G9",
            ButtonId::G10 => "G10",
            ButtonId::G11 => "G11",
            ButtonId::G12 => "G12",
            ButtonId::G13 => "G13",
            ButtonId::G14 => "G14",
            ButtonId::G15 => "G15",
            ButtonId::G16 => "G16",
            ButtonId::G17 => "G17",
            ButtonId::G18 => "G18",
            ButtonId::G19 => "G19",
            ButtonId::G20 => "G20",
            ButtonId::G21 => "G21",
            ButtonId::G22 => "G22",
            ButtonId::Bd => "BD",
            ButtonId::L1 => "L1",
            ButtonId::L2 => "L2",
            ButtonId::L3 => "L3",
            ButtonId::L4 => "L4",
            ButtonId::M1 => "M1",
            ButtonId::M2 => "M2",
            ButtonId::M3 => "M3",
            ButtonId::Mr => "MR",
            ButtonId::Left => "LEFT",
            ButtonId::Down => "DOWN",
            ButtonId::Stick => "STICK",
        }
    }

    /// Parse a canonical name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|button| button.name().eq_ignore_ascii_case(name))
    }

    /// Returns true for the 22 programmable G-keys
    pub fn is_g_key(self) -> bool {
        self.index() <= ButtonId::G22.index()
    }
}

/// A set of buttons stored as a bitmask over [`ButtonId::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u64);

impl ButtonSet {
    /// The empty set
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Build a set from a slice of buttons
    pub fn from_buttons(buttons: &[ButtonId]) -> Self {
        let mut set = Self::new();
        for &button in buttons {
            set.insert(button);
        }
        set
    }

    pub fn insert(&mut self, button: ButtonId) {
        self.0 |= 1 << button.index();
    }

    pub fn remove(&mut self, button: ButtonId) {
        self.0 &= !(1 << button.index());
    }

    pub fn contains(&self, button: ButtonId) -> bool {
        self.0 & (1 << button.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Buttons in `self` that are not in `other`
    pub fn difference(&self, other: &ButtonSet) -> ButtonSet {
        ButtonSet(self.0 & !other.0)
    }

    /// Iterate members in index order
    pub fn iter(&self) -> impl Iterator<Item = ButtonId> + '_ {
        ButtonId::ALL
            .iter()
            .copied()
            .filter(move |button| self.contains(*button))
    }
}
