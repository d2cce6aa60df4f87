//! Cell material tags.

/// Colour identity of a liquid droplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Light daytime shade.
    Pale,
    /// Main daytime colour.
    Azure,
    /// Light night shade.
    Mist,
    /// Main night colour.
    Indigo,
    /// Rare accent, shared by both families.
    Coral,
}

impl Species {
    /// All species, in palette order.
    pub const ALL: [Species; 5] = [
        Species::Pale,
        Species::Azure,
        Species::Mist,
        Species::Indigo,
        Species::Coral,
    ];

    /// Heavy droplets resist rising through lighter ones when clustering.
    pub fn is_heavy(self) -> bool {
        self == Species::Coral
    }
}

/// Material of one grid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Empty air.
    #[default]
    Background,
    /// Solid terrain.
    Wall,
    /// A droplet of the given species.
    Liquid(Species),
}

impl Cell {
    /// Species of the droplet in this cell, if it holds liquid.
    pub fn species(self) -> Option<Species> {
        match self {
            Cell::Liquid(species) => Some(species),
            Cell::Background | Cell::Wall => None,
        }
    }

    pub fn is_liquid(self) -> bool {
        self.species().is_some()
    }

    pub fn is_background(self) -> bool {
        self == Cell::Background
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    /// Anything other than background counts as occupied.
    pub fn is_occupied(self) -> bool {
        self != Cell::Background
    }
}
