//! Fake data generation for the `seed` command.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use showroom_model::{Car, Customer};

/// Per-make model lineup and base price band.
struct MakeProfile {
    make: &'static str,
    models: &'static [&'static str],
    price_band: (i64, i64),
}

const MAKES: &[MakeProfile] = &[
    MakeProfile {
        make: "Toyota",
        models: &["Camry", "Corolla", "RAV4", "Highlander", "Prius", "Tacoma"],
        price_band: (20_000, 45_000),
    },
    MakeProfile {
        make: "Honda",
        models: &["Civic", "Accord", "CR-V", "Pilot", "Fit", "Ridgeline"],
        price_band: (20_000, 50_000),
    },
    MakeProfile {
        make: "Ford",
        models: &["F-150", "Mustang", "Explorer", "Fusion", "Focus", "Escape"],
        price_band: (25_000, 55_000),
    },
    MakeProfile {
        make: "Chevrolet",
        models: &["Silverado", "Malibu", "Equinox", "Traverse", "Camaro"],
        price_band: (22_000, 52_000),
    },
    MakeProfile {
        make: "BMW",
        models: &["X3", "X5", "3 Series", "5 Series", "X1", "1 Series"],
        price_band: (35_000, 80_000),
    },
    MakeProfile {
        make: "Mercedes-Benz",
        models: &["C-Class", "E-Class", "GLC", "GLE", "A-Class"],
        price_band: (40_000, 90_000),
    },
    MakeProfile {
        make: "Audi",
        models: &["A3", "A4", "Q5", "Q7", "A6", "Q3"],
        price_band: (35_000, 85_000),
    },
    MakeProfile {
        make: "Lexus",
        models: &["RX", "ES", "GX", "LX", "NX", "IS"],
        price_band: (40_000, 100_000),
    },
    MakeProfile {
        make: "Nissan",
        models: &["Altima", "Sentra", "Rogue", "Pathfinder", "Titan"],
        price_band: (18_000, 40_000),
    },
    MakeProfile {
        make: "Volkswagen",
        models: &["Jetta", "Passat", "Tiguan", "Atlas", "Golf"],
        price_band: (18_000, 40_000),
    },
    MakeProfile {
        make: "Hyundai",
        models: &["Sonata", "Elantra", "Tucson", "Santa Fe", "Kona"],
        price_band: (17_000, 35_000),
    },
    MakeProfile {
        make: "Kia",
        models: &["Sorento", "Sportage", "Telluride", "Seltos", "Forte"],
        price_band: (17_000, 35_000),
    },
    MakeProfile {
        make: "Volvo",
        models: &["XC60", "XC90", "S60", "V60", "XC40"],
        price_band: (35_000, 70_000),
    },
    MakeProfile {
        make: "Subaru",
        models: &["Outback", "Forester", "Crosstrek", "Impreza", "Ascent"],
        price_band: (22_000, 45_000),
    },
    MakeProfile {
        make: "Mazda",
        models: &["CX-5", "CX-9", "Mazda3", "Mazda6", "MX-5 Miata"],
        price_band: (20_000, 45_000),
    },
    MakeProfile {
        make: "Tesla",
        models: &["Model 3", "Model Y", "Model S", "Model X"],
        price_band: (45_000, 120_000),
    },
    MakeProfile {
        make: "Porsche",
        models: &["911", "Cayenne", "Macan", "Panamera", "Taycan"],
        price_band: (60_000, 200_000),
    },
    MakeProfile {
        make: "Ferrari",
        models: &["488 Spider", "Roma", "Portofino", "SF90 Stradale"],
        price_band: (250_000, 500_000),
    },
];

const VERSIONS: &[&str] = &[
    "Base",
    "Sport",
    "Touring",
    "Luxury",
    "Premium",
    "Limited",
    "Platinum",
    "Executive",
    "Grand Touring",
    "Signature",
    "Ultimate Choice",
    "Reserve",
    "High Country",
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
];

const LOCATIONS: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "Austin",
];

const JOBS: &[&str] = &[
    "Engineer",
    "Teacher",
    "Nurse",
    "Accountant",
    "Designer",
    "Lawyer",
    "Chef",
    "Electrician",
    "Pharmacist",
    "Analyst",
];

const GENDERS: &[&str] = &["Male", "Female", "Other"];

fn pick<'a>(rng: &mut StdRng, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Generate `count` cars with realistic make/model/price combinations.
/// Newer model years shift the price band upward.
pub(crate) fn generate_cars(rng: &mut StdRng, count: usize) -> Vec<Car> {
    (0..count)
        .map(|_| {
            let profile = &MAKES[rng.gen_range(0..MAKES.len())];
            let year = rng.gen_range(2018..=2024);
            let adjustment = (year - 2018) * 2_000;
            let (low, high) = profile.price_band;
            Car {
                id: None,
                make: profile.make.to_string(),
                model: pick(rng, profile.models).to_string(),
                version: pick(rng, VERSIONS).to_string(),
                year,
                price: rng.gen_range(low + adjustment..=high + adjustment),
            }
        })
        .collect()
}

/// Generate `count` customers with unique emails.
pub(crate) fn generate_customers(rng: &mut StdRng, count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            Customer {
                id: None,
                customer_name: format!("{first} {last}"),
                // The index keeps emails unique across duplicate names.
                email: format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i),
                age: rng.gen_range(18..=80),
                gender: pick(rng, GENDERS).to_string(),
                location: pick(rng, LOCATIONS).to_string(),
                job: pick(rng, JOBS).to_string(),
                salary: rng.gen_range(25_000..=150_000),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use showroom_model::Validate;

    #[test]
    fn generated_cars_pass_validation() {
        let mut rng = StdRng::seed_from_u64(42);
        for car in generate_cars(&mut rng, 50) {
            assert!(car.validated().is_ok());
        }
    }

    #[test]
    fn generated_customers_pass_validation_with_unique_emails() {
        let mut rng = StdRng::seed_from_u64(42);
        let customers = generate_customers(&mut rng, 50);
        let mut emails: Vec<_> = customers.iter().map(|c| c.email.clone()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), customers.len());
        for customer in customers {
            assert!(customer.validated().is_ok());
        }
    }

    #[test]
    fn same_seed_reproduces_the_dataset() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(generate_cars(&mut a, 10), generate_cars(&mut b, 10));
    }
}
