// file: src/models/place.rs
// description: static catalog of once-popular places
// reference: internal data structures

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place {
    pub name: &'static str,
    pub location: &'static str,
    pub description: &'static str,
}

pub const PLACES: &[Place] = &[
    Place::new(
        "Times Square",
        "New York, USA",
        "Times Square was once the vibrant heart of New York City, known for its dazzling lights and bustling crowds.",
    ),
    Place::new(
        "Detroit",
        "Michigan, USA",
        "Detroit was once the Motor City, a thriving industrial hub and symbol of American manufacturing power.",
    ),
    Place::new(
        "Pripyat",
        "Ukraine",
        "Pripyat was a modern Soviet city until the Chernobyl disaster, now a ghost town frozen in time.",
    ),
    Place::new(
        "Hashima Island",
        "Japan",
        "Hashima Island, also known as Gunkanjima, was once the most densely populated place on Earth, now abandoned.",
    ),
    Place::new(
        "Bodie",
        "California, USA",
        "Bodie was a booming gold-mining town in the 1800s, now preserved as a ghost town.",
    ),
    Place::new(
        "Varosha",
        "Cyprus",
        "Varosha was a popular tourist destination until 1974, now an abandoned resort town.",
    ),
    Place::new(
        "Centralia",
        "Pennsylvania, USA",
        "Centralia was a mining town until an underground fire forced its abandonment.",
    ),
    Place::new(
        "Kolmanskop",
        "Namibia",
        "Kolmanskop was a wealthy diamond mining town, now being reclaimed by the desert.",
    ),
    Place::new(
        "Craco",
        "Italy",
        "Craco was a medieval hilltop town abandoned due to natural disasters.",
    ),
    Place::new(
        "Oradour-sur-Glane",
        "France",
        "Oradour-sur-Glane was preserved as a memorial after being destroyed in World War II.",
    ),
    Place::new(
        "Humberstone",
        "Chile",
        "Humberstone was a thriving saltpeter mining town, now a UNESCO World Heritage Site.",
    ),
    Place::new(
        "Kadykchan",
        "Russia",
        "Kadykchan was a Soviet mining town abandoned after the collapse of the USSR.",
    ),
];

impl Place {
    pub const fn new(
        name: &'static str,
        location: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            location,
            description,
        }
    }

    /// Case-insensitive lookup in the built-in catalog.
    pub fn find(name: &str) -> Option<Place> {
        let wanted = name.trim();
        PLACES
            .iter()
            .find(|place| place.name.eq_ignore_ascii_case(wanted))
            .copied()
    }

    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }

    /// `" (New York, USA)"`, or empty when the place has no location.
    pub fn location_suffix(&self) -> String {
        if self.has_location() {
            format!(" ({})", self.location.trim())
        } else {
            String::new()
        }
    }
}
