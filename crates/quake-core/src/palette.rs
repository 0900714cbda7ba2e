// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::dataset::{DamageLevel, InfrastructureStatus};

pub const TSUNAMI_BLUE: &str = "#3b82f6";
pub const STATION_PURPLE: &str = "#8b5cf6";
pub const EPICENTER_RED: &str = "#dc2626";

/// The four marker colors used for damage and operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    Red,
    Amber,
    Green,
    Gray,
}

impl StatusColor {
    pub fn hex(self) -> &'static str {
        match self {
            StatusColor::Red => "#dc2626",
            StatusColor::Amber => "#f59e0b",
            StatusColor::Green => "#10b981",
            StatusColor::Gray => "#6b7280",
        }
    }
}

pub fn damage_color(level: &DamageLevel) -> StatusColor {
    match level {
        DamageLevel::Severe => StatusColor::Red,
        DamageLevel::Moderate => StatusColor::Amber,
        DamageLevel::Light => StatusColor::Green,
        DamageLevel::Other(_) => StatusColor::Gray,
    }
}

pub fn infrastructure_color(status: &InfrastructureStatus) -> StatusColor {
    match status {
        InfrastructureStatus::Operational => StatusColor::Green,
        InfrastructureStatus::Damaged => StatusColor::Amber,
        InfrastructureStatus::Offline => StatusColor::Red,
        InfrastructureStatus::Other(_) => StatusColor::Gray,
    }
}

/// Parses `#rrggbb` (or `rrggbb`) into its channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_color_is_total() {
        assert_eq!(damage_color(&"severe".into()), StatusColor::Red);
        assert_eq!(damage_color(&"moderate".into()), StatusColor::Amber);
        assert_eq!(damage_color(&"light".into()), StatusColor::Green);
        for unknown in ["", "Severe", "extreme", "none"] {
            assert_eq!(damage_color(&unknown.into()), StatusColor::Gray);
        }
    }

    #[test]
    fn test_infrastructure_color_is_total() {
        assert_eq!(infrastructure_color(&"operational".into()), StatusColor::Green);
        assert_eq!(infrastructure_color(&"damaged".into()), StatusColor::Amber);
        assert_eq!(infrastructure_color(&"offline".into()), StatusColor::Red);
        for unknown in ["", "destroyed", "OFFLINE"] {
            assert_eq!(infrastructure_color(&unknown.into()), StatusColor::Gray);
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#dc2626"), Some((0xdc, 0x26, 0x26)));
        assert_eq!(parse_hex("10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }
}
