//! Region-type classification from prefix-coded names.
//!
//! A region-type string such as `wtntp00024000000000000000000000` is matched
//! against an ordered prefix table; zone-transition prefixes additionally
//! encode a destination at fixed character offsets.

use glam::Vec3;

/// Zone-point index used when the transition is not absolute.
const REFERENCE_ZONE_ID: u32 = 255;

/// Kind of region a BSP leaf belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionClass {
	/// Ordinary space.
	Normal,
	/// Water volume.
	Water,
	/// Lava volume.
	Lava,
	/// Player-versus-player area.
	Pvp,
	/// Slippery floor.
	Slippery,
	/// Water volume that blocks line of sight.
	WaterBlockingLos,
	/// Freezing water volume.
	FreezingWater,
	/// Zone transition.
	Zoneline,
	/// Recognized prefix with unrecognized detail.
	Unknown,
}

impl RegionClass {
	/// Stable label for text/JSON output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::Water => "water",
			Self::Lava => "lava",
			Self::Pvp => "pvp",
			Self::Slippery => "slippery",
			Self::WaterBlockingLos => "water_blocking_los",
			Self::FreezingWater => "freezing_water",
			Self::Zoneline => "zoneline",
			Self::Unknown => "unknown",
		}
	}
}

/// Destination of a zone transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zoneline {
	/// Index into the destination zone's zone-point table.
	Reference {
		/// Zone-point index.
		index: u32,
	},
	/// Absolute destination.
	Absolute {
		/// Destination zone id.
		zone_id: u32,
		/// Destination position.
		position: Vec3,
		/// Destination heading.
		heading: f32,
	},
}

/// Parsed region-type string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionClassification {
	/// Region classes in prefix-table order.
	pub classes: Vec<RegionClass>,
	/// Transition destination, when the name encodes one.
	pub zoneline: Option<Zoneline>,
}

impl RegionClassification {
	/// Whether `class` applies.
	pub fn has(&self, class: RegionClass) -> bool {
		self.classes.contains(&class)
	}
}

const PREFIXES: &[(&str, &[RegionClass])] = &[
	("wtn_", &[RegionClass::Water]),
	("wt_", &[RegionClass::Water]),
	("wtntp", &[RegionClass::Water, RegionClass::Zoneline]),
	("lan_", &[RegionClass::Lava]),
	("la_", &[RegionClass::Lava]),
	("lantp", &[RegionClass::Lava, RegionClass::Zoneline]),
	("drntp", &[RegionClass::Zoneline]),
	("drp_", &[RegionClass::Pvp]),
	("sln_", &[RegionClass::WaterBlockingLos]),
	("vwn_", &[RegionClass::FreezingWater]),
];

/// Classify a lower-cased region-type string.
pub fn classify(name: &str) -> RegionClassification {
	if name.starts_with("drn_") {
		let class = if name.contains("_s_") {
			RegionClass::Slippery
		} else {
			RegionClass::Unknown
		};
		return RegionClassification {
			classes: vec![class],
			zoneline: None,
		};
	}

	for (prefix, classes) in PREFIXES {
		if name.starts_with(prefix) {
			let zoneline = if classes.contains(&RegionClass::Zoneline) {
				parse_zoneline(name)
			} else {
				None
			};
			return RegionClassification {
				classes: classes.to_vec(),
				zoneline,
			};
		}
	}

	RegionClassification {
		classes: vec![RegionClass::Normal],
		zoneline: None,
	}
}

fn field<T: std::str::FromStr>(name: &str, start: usize, end: usize) -> Option<T> {
	name.get(start..end)?.parse().ok()
}

fn coordinate(name: &str, start: usize, end: usize) -> Option<f32> {
	field::<i32>(name, start, end).map(|value| value as f32)
}

/// Decode the transition destination at its fixed offsets.
pub fn parse_zoneline(name: &str) -> Option<Zoneline> {
	if name.get(5..10)? == "_zone" {
		return Some(Zoneline::Reference { index: 0 });
	}

	let zone_id = field::<u32>(name, 5, 10)?;
	if zone_id == REFERENCE_ZONE_ID {
		return Some(Zoneline::Reference {
			index: field(name, 10, 16)?,
		});
	}

	Some(Zoneline::Absolute {
		zone_id,
		position: Vec3::new(coordinate(name, 10, 16)?, coordinate(name, 16, 22)?, coordinate(name, 22, 28)?),
		heading: coordinate(name, 28, 31)?,
	})
}

#[cfg(test)]
mod tests;
