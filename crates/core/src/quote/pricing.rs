use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::shipment::{
    PricingTraceStep, QuoteEstimate, Region, ShipmentRequest, ShipmentType, Speed,
};

pub const CURRENCY: &str = "USD";

const DOMESTIC_MULTIPLIER: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
const DEFAULT_CORRIDOR_MULTIPLIER: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
const FUEL_SURCHARGE_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);
const INSURANCE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);
const MINIMUM_INSURANCE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
// Flat for every destination region.
const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
const CONTAINER_WEIGHT_ALLOWANCE_KG: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Multiplier per unordered region pair, in hundredths.
const CORRIDORS: [(Region, Region, u32); 6] = [
    (Region::Africa, Region::Europe, 95),
    (Region::Europe, Region::NorthAmerica, 110),
    (Region::NorthAmerica, Region::SouthAmerica, 85),
    (Region::Europe, Region::SouthAmerica, 130),
    (Region::Africa, Region::NorthAmerica, 140),
    (Region::Africa, Region::SouthAmerica, 150),
];

pub fn base_price(shipment_type: ShipmentType) -> Decimal {
    match shipment_type {
        ShipmentType::Parcel => Decimal::from(85),
        ShipmentType::Pallet => Decimal::from(425),
        ShipmentType::Container => Decimal::from(2850),
    }
}

pub fn corridor_multiplier(origin: Region, destination: Region) -> Decimal {
    if origin == destination {
        return DOMESTIC_MULTIPLIER;
    }

    CORRIDORS
        .iter()
        .find(|(a, b, _)| (*a, *b) == (origin, destination) || (*a, *b) == (destination, origin))
        .map(|(_, _, hundredths)| Decimal::from_parts(*hundredths, 0, 0, false, 2))
        .unwrap_or(DEFAULT_CORRIDOR_MULTIPLIER)
}

/// Tier boundaries are inclusive to the lower bracket.
pub fn weight_charge(shipment_type: ShipmentType, weight_kg: Decimal) -> Decimal {
    let rate = |tenths: i64| Decimal::new(tenths, 1);
    let hundredths = |value: i64| Decimal::new(value, 2);

    match shipment_type {
        ShipmentType::Parcel => {
            let per_kg = if weight_kg <= Decimal::from(5) {
                rate(45)
            } else if weight_kg <= Decimal::from(20) {
                rate(38)
            } else {
                rate(32)
            };
            weight_kg * per_kg
        }
        ShipmentType::Pallet => {
            let per_kg = if weight_kg <= Decimal::from(100) {
                rate(18)
            } else if weight_kg <= Decimal::from(500) {
                rate(14)
            } else {
                rate(11)
            };
            weight_kg * per_kg
        }
        ShipmentType::Container if weight_kg > CONTAINER_WEIGHT_ALLOWANCE_KG => {
            (weight_kg - CONTAINER_WEIGHT_ALLOWANCE_KG) * hundredths(15)
        }
        ShipmentType::Container => Decimal::ZERO,
    }
}

pub fn speed_multiplier(speed: Speed) -> Decimal {
    match speed {
        Speed::Express => Decimal::new(175, 2),
        Speed::Standard => Decimal::ONE,
        Speed::Economy => Decimal::new(82, 2),
    }
}

pub fn transit_time(speed: Speed) -> &'static str {
    match speed {
        Speed::Express => "3–5 days",
        Speed::Standard => "10–15 days",
        Speed::Economy => "20–35 days",
    }
}

pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn step(stage: &str, detail: impl Into<String>, amount: Decimal) -> PricingTraceStep {
    PricingTraceStep { stage: stage.to_string(), detail: detail.into(), amount }
}

pub fn price_shipment(request: &ShipmentRequest) -> QuoteEstimate {
    let base = base_price(request.shipment_type);
    let weight = weight_charge(request.shipment_type, request.weight_kg);
    let corridor = corridor_multiplier(request.origin_region, request.destination_region);
    let speed = speed_multiplier(request.speed);

    let subtotal = (base + weight) * corridor * speed;
    let fuel_surcharge = subtotal * FUEL_SURCHARGE_RATE;
    let insurance = (subtotal * INSURANCE_RATE).max(MINIMUM_INSURANCE);
    let pre_tax_total = subtotal + fuel_surcharge + insurance;
    let tax = pre_tax_total * TAX_RATE;
    let total = pre_tax_total + tax;

    let corridor_detail = if request.is_domestic() {
        format!("domestic ({})", request.origin_region)
    } else {
        format!("{} - {}", request.origin_region, request.destination_region)
    };

    QuoteEstimate {
        price: round_to_cents(total),
        currency: CURRENCY.to_string(),
        transit_time: transit_time(request.speed).to_string(),
        route_summary: request.route_summary(),
        breakdown: vec![
            step("base_price", request.shipment_type.label(), base),
            step("weight_charge", format!("{} kg", request.weight_kg), weight),
            step("corridor_multiplier", corridor_detail, corridor),
            step("speed_multiplier", request.speed.label(), speed),
            step("subtotal", "(base_price + weight_charge) * corridor * speed", subtotal),
            step("fuel_surcharge", "12% of subtotal", fuel_surcharge),
            step("insurance", "max(15, 0.5% of subtotal)", insurance),
            step("pre_tax_total", "subtotal + fuel_surcharge + insurance", pre_tax_total),
            step("tax", "15% of pre_tax_total", tax),
            step("total", "pre_tax_total + tax", total),
        ],
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{corridor_multiplier, price_shipment, round_to_cents, weight_charge};
    use crate::domain::shipment::{Region, ShipmentRequest, ShipmentType, Speed};

    fn request(
        origin: Region,
        destination: Region,
        shipment_type: ShipmentType,
        weight_kg: Decimal,
        speed: Speed,
    ) -> ShipmentRequest {
        ShipmentRequest {
            origin_region: origin,
            destination_region: destination,
            origin_city: "Origin".to_string(),
            destination_city: "Destination".to_string(),
            shipment_type,
            weight_kg,
            speed,
            notes: None,
        }
    }

    #[test]
    fn hamburg_to_nairobi_parcel_matches_worked_example() {
        let estimate = price_shipment(&ShipmentRequest {
            origin_city: "Hamburg".to_string(),
            destination_city: "Nairobi".to_string(),
            ..request(
                Region::Europe,
                Region::Africa,
                ShipmentType::Parcel,
                Decimal::from(10),
                Speed::Standard,
            )
        });

        assert_eq!(estimate.step("base_price"), Some(Decimal::from(85)));
        assert_eq!(estimate.step("weight_charge"), Some(Decimal::new(38, 0)));
        assert_eq!(estimate.step("corridor_multiplier"), Some(Decimal::new(95, 2)));
        assert_eq!(estimate.step("subtotal"), Some(Decimal::new(11685, 2)));
        assert_eq!(estimate.step("fuel_surcharge"), Some(Decimal::new(14022, 3)));
        assert_eq!(estimate.step("insurance"), Some(Decimal::from(15)));
        assert_eq!(estimate.step("pre_tax_total"), Some(Decimal::new(145872, 3)));
        assert_eq!(estimate.step("tax"), Some(Decimal::new(218808, 4)));
        assert_eq!(estimate.price, Decimal::new(16775, 2));
        assert_eq!(estimate.currency, "USD");
        assert_eq!(estimate.transit_time, "10–15 days");
        assert_eq!(estimate.route_summary, "Hamburg, Europe → Nairobi, Africa");
    }

    #[test]
    fn overweight_express_container_charges_only_the_excess() {
        let estimate = price_shipment(&request(
            Region::Europe,
            Region::NorthAmerica,
            ShipmentType::Container,
            Decimal::from(12_000),
            Speed::Express,
        ));

        assert_eq!(estimate.step("weight_charge"), Some(Decimal::from(300)));
        assert_eq!(estimate.step("subtotal"), Some(Decimal::new(606375, 2)));
        assert_eq!(estimate.step("insurance"), Some(Decimal::new(3031875, 5)));
        assert_eq!(estimate.price, Decimal::new(784498, 2));
        assert_eq!(estimate.transit_time, "3–5 days");
    }

    #[test]
    fn domestic_economy_pallet_at_tier_boundary() {
        let estimate = price_shipment(&request(
            Region::Africa,
            Region::Africa,
            ShipmentType::Pallet,
            Decimal::from(100),
            Speed::Economy,
        ));

        assert_eq!(estimate.step("weight_charge"), Some(Decimal::from(180)));
        assert_eq!(estimate.step("corridor_multiplier"), Some(Decimal::new(6, 1)));
        assert_eq!(estimate.step("subtotal"), Some(Decimal::new(29766, 2)));
        assert_eq!(estimate.price, Decimal::new(40064, 2));
        assert_eq!(estimate.transit_time, "20–35 days");
    }

    #[test]
    fn tier_boundaries_use_the_lower_bracket_rate() {
        let cases = [
            (ShipmentType::Parcel, 5, Decimal::new(225, 1)),
            (ShipmentType::Parcel, 20, Decimal::from(76)),
            (ShipmentType::Parcel, 21, Decimal::new(672, 1)),
            (ShipmentType::Pallet, 100, Decimal::from(180)),
            (ShipmentType::Pallet, 500, Decimal::from(700)),
            (ShipmentType::Pallet, 501, Decimal::new(5511, 1)),
            (ShipmentType::Container, 10_000, Decimal::ZERO),
            (ShipmentType::Container, 10_001, Decimal::new(15, 2)),
        ];

        for (shipment_type, weight, expected) in cases {
            assert_eq!(
                weight_charge(shipment_type, Decimal::from(weight)),
                expected,
                "{shipment_type} at {weight} kg"
            );
        }
    }

    #[test]
    fn corridor_lookup_is_unordered_and_domestic_is_flat() {
        for region in Region::ALL {
            assert_eq!(corridor_multiplier(region, region), Decimal::new(6, 1));
        }

        assert_eq!(
            corridor_multiplier(Region::SouthAmerica, Region::Africa),
            corridor_multiplier(Region::Africa, Region::SouthAmerica)
        );
        assert_eq!(corridor_multiplier(Region::SouthAmerica, Region::Africa), Decimal::new(15, 1));
        assert_eq!(
            corridor_multiplier(Region::SouthAmerica, Region::NorthAmerica),
            Decimal::new(85, 2)
        );
        assert_eq!(corridor_multiplier(Region::NorthAmerica, Region::Europe), Decimal::new(11, 1));
    }

    #[test]
    fn minimum_insurance_and_non_negative_price_hold_for_every_combination() {
        let types = [ShipmentType::Parcel, ShipmentType::Pallet, ShipmentType::Container];
        let speeds = [Speed::Express, Speed::Standard, Speed::Economy];

        for origin in Region::ALL {
            for destination in Region::ALL {
                for shipment_type in types {
                    for speed in speeds {
                        let estimate = price_shipment(&request(
                            origin,
                            destination,
                            shipment_type,
                            Decimal::new(1, 1),
                            speed,
                        ));
                        let insurance = estimate.step("insurance").unwrap_or_default();
                        assert!(insurance >= Decimal::from(15));
                        assert!(estimate.price >= Decimal::ZERO);
                    }
                }
            }
        }
    }

    #[test]
    fn rounding_is_half_up_on_the_cent() {
        assert_eq!(round_to_cents(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_to_cents(Decimal::new(12344, 3)), Decimal::new(1234, 2));
        assert_eq!(round_to_cents(Decimal::new(1677528, 4)), Decimal::new(16775, 2));
    }

    #[test]
    fn pricing_is_deterministic() {
        let input = request(
            Region::Europe,
            Region::SouthAmerica,
            ShipmentType::Pallet,
            Decimal::new(3333, 1),
            Speed::Express,
        );

        assert_eq!(price_shipment(&input), price_shipment(&input));
    }
}
