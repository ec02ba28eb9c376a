//! Explicit distribution of spot types within a level.

use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleType;

/// Relative share of each vehicle type among a level's spots.
///
/// Weights need not sum to one; only their ratio matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpotMix {
    pub motorcycle: f64,
    pub car: f64,
    pub truck: f64,
}

impl Default for SpotMix {
    fn default() -> Self {
        Self {
            motorcycle: 0.2,
            car: 0.7,
            truck: 0.1,
        }
    }
}

impl SpotMix {
    /// A mix with a single vehicle type.
    pub fn only(vehicle_type: VehicleType) -> Self {
        let mut mix = Self {
            motorcycle: 0.0,
            car: 0.0,
            truck: 0.0,
        };
        *mix.weight_mut(vehicle_type) = 1.0;
        mix
    }

    /// Weight for one vehicle type.
    pub fn weight(&self, vehicle_type: VehicleType) -> f64 {
        match vehicle_type {
            VehicleType::Motorcycle => self.motorcycle,
            VehicleType::Car => self.car,
            VehicleType::Truck => self.truck,
        }
    }

    fn weight_mut(&mut self, vehicle_type: VehicleType) -> &mut f64 {
        match vehicle_type {
            VehicleType::Motorcycle => &mut self.motorcycle,
            VehicleType::Car => &mut self.car,
            VehicleType::Truck => &mut self.truck,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.motorcycle + self.car + self.truck
    }

    /// Returns `true` when every weight is finite, non-negative, and at
    /// least one is positive.
    pub fn is_valid(&self) -> bool {
        let weights = [self.motorcycle, self.car, self.truck];
        weights.iter().all(|w| w.is_finite() && *w >= 0.0) && self.total() > 0.0
    }
}

/// Exact spot counts per vehicle type for one level.
///
/// Spots are laid out in [`SpotLayout::ORDER`]: cars first, then
/// motorcycles, then trucks.
///
/// # Examples
///
/// ```
/// use parking_sim::lot::SpotLayout;
/// use parking_sim::vehicle::VehicleType;
///
/// let layout = SpotLayout::proportional(10);
/// assert_eq!(layout.count(VehicleType::Car), 7);
/// assert_eq!(layout.count(VehicleType::Motorcycle), 2);
/// assert_eq!(layout.count(VehicleType::Truck), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpotLayout {
    pub car: usize,
    pub motorcycle: usize,
    pub truck: usize,
}

impl SpotLayout {
    /// Order in which spot types are laid out along a level.
    pub const ORDER: [VehicleType; 3] = [VehicleType::Car, VehicleType::Motorcycle, VehicleType::Truck];

    /// Creates a layout from explicit counts.
    pub fn new(car: usize, motorcycle: usize, truck: usize) -> Self {
        Self {
            car,
            motorcycle,
            truck,
        }
    }

    /// `spot_count` spots all accepting one vehicle type.
    pub fn uniform(vehicle_type: VehicleType, spot_count: usize) -> Self {
        let mut layout = Self::default();
        *layout.count_mut(vehicle_type) = spot_count;
        layout
    }

    /// `spot_count` spots split by the default [`SpotMix`].
    pub fn proportional(spot_count: usize) -> Self {
        Self::from_mix(spot_count, &SpotMix::default())
    }

    /// Splits `spot_count` spots by `mix` using largest-remainder rounding.
    ///
    /// The counts always sum to `spot_count`. Ties in the remainder go to
    /// the type that comes first in [`SpotLayout::ORDER`]. An invalid mix
    /// yields all-car spots.
    pub fn from_mix(spot_count: usize, mix: &SpotMix) -> Self {
        if !mix.is_valid() {
            return Self::uniform(VehicleType::Car, spot_count);
        }

        let total = mix.total();
        let mut layout = Self::default();
        let mut remainders = Vec::with_capacity(Self::ORDER.len());
        for vt in Self::ORDER {
            let quota = spot_count as f64 * mix.weight(vt) / total;
            let whole = quota.floor() as usize;
            *layout.count_mut(vt) = whole;
            remainders.push((vt, quota - whole as f64));
        }

        // stable sort keeps ORDER for equal remainders
        remainders.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut left = spot_count.saturating_sub(layout.total());
        for (vt, _) in remainders.iter().cycle() {
            if left == 0 {
                break;
            }
            *layout.count_mut(*vt) += 1;
            left -= 1;
        }
        layout
    }

    /// Number of spots for one vehicle type.
    pub fn count(&self, vehicle_type: VehicleType) -> usize {
        match vehicle_type {
            VehicleType::Car => self.car,
            VehicleType::Motorcycle => self.motorcycle,
            VehicleType::Truck => self.truck,
        }
    }

    fn count_mut(&mut self, vehicle_type: VehicleType) -> &mut usize {
        match vehicle_type {
            VehicleType::Car => &mut self.car,
            VehicleType::Motorcycle => &mut self.motorcycle,
            VehicleType::Truck => &mut self.truck,
        }
    }

    /// Total number of spots, saturating at `usize::MAX`.
    pub fn total(&self) -> usize {
        self.checked_total().unwrap_or(usize::MAX)
    }

    /// Total number of spots, or `None` if the counts overflow `usize`.
    pub fn checked_total(&self) -> Option<usize> {
        self.car
            .checked_add(self.motorcycle)?
            .checked_add(self.truck)
    }

    /// Accepted type of every spot, in layout order.
    pub fn spot_types(&self) -> impl Iterator<Item = VehicleType> + '_ {
        Self::ORDER
            .into_iter()
            .flat_map(move |vt| std::iter::repeat_n(vt, self.count(vt)))
    }
}
