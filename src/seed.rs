//! Sample catalog the dashboard boots with.

use crate::domain::{Category, ProductDraft};

fn item(
    name: &str,
    brand: &str,
    category: Category,
    price: f64,
    stock: u32,
    description: &str,
    specs: &[(&str, &str)],
) -> ProductDraft {
    let slug = name.to_lowercase().replace(' ', "-");
    specs.iter().fold(
        ProductDraft::new(name, brand, category, price, stock)
            .with_description(description)
            .with_image(format!("https://images.example.com/products/{slug}.jpg")),
        |draft, (key, value)| draft.with_spec(*key, *value),
    )
}

/// Drafts covering every category, in the order they are listed.
pub fn catalog() -> Vec<ProductDraft> {
    vec![
        item(
            "Keychron K2",
            "Keychron",
            Category::Keyboard,
            1_790_000.0,
            25,
            "75% wireless mechanical keyboard with hot-swappable switches",
            &[("switch", "Gateron Brown"), ("connection", "Bluetooth 5.1 / USB-C")],
        ),
        item(
            "MX Keys S",
            "Logitech",
            Category::Keyboard,
            2_490_000.0,
            18,
            "Low-profile illuminated keyboard for multi-device work",
            &[("layout", "Full size"), ("battery", "10 days backlit")],
        ),
        item(
            "Huntsman Mini",
            "Razer",
            Category::Keyboard,
            2_190_000.0,
            9,
            "60% gaming keyboard with optical switches",
            &[("switch", "Razer Linear Optical"), ("polling", "8000 Hz")],
        ),
        item(
            "G Pro X Superlight",
            "Logitech",
            Category::Mouse,
            2_990_000.0,
            30,
            "Ultra-light wireless esports mouse",
            &[("weight", "63 g"), ("sensor", "HERO 25K")],
        ),
        item(
            "DeathAdder V3",
            "Razer",
            Category::Mouse,
            1_690_000.0,
            22,
            "Ergonomic wired gaming mouse",
            &[("weight", "59 g"), ("dpi", "30000")],
        ),
        item(
            "MX Master 3S",
            "Logitech",
            Category::Mouse,
            2_290_000.0,
            14,
            "Quiet-click productivity mouse with MagSpeed wheel",
            &[("dpi", "8000"), ("connection", "Bolt / Bluetooth")],
        ),
        item(
            "UltraGear 27GP850",
            "LG",
            Category::Monitor,
            8_990_000.0,
            6,
            "27 inch QHD Nano IPS gaming monitor",
            &[("resolution", "2560x1440"), ("refresh", "165 Hz")],
        ),
        item(
            "U2723QE",
            "Dell",
            Category::Monitor,
            12_490_000.0,
            4,
            "27 inch 4K USB-C hub monitor",
            &[("resolution", "3840x2160"), ("panel", "IPS Black")],
        ),
        item(
            "Cloud II",
            "HyperX",
            Category::Headset,
            1_590_000.0,
            40,
            "Wired gaming headset with virtual 7.1 surround",
            &[("driver", "53 mm"), ("connection", "USB / 3.5 mm")],
        ),
        item(
            "Arctis Nova 7",
            "SteelSeries",
            Category::Headset,
            4_290_000.0,
            11,
            "Wireless multi-platform headset",
            &[("battery", "38 hours"), ("connection", "2.4 GHz / Bluetooth")],
        ),
        item(
            "Brio 4K",
            "Logitech",
            Category::Webcam,
            4_990_000.0,
            8,
            "4K webcam with HDR and Windows Hello support",
            &[("resolution", "4096x2160"), ("fov", "90°")],
        ),
        item(
            "Kiyo Pro",
            "Razer",
            Category::Webcam,
            3_190_000.0,
            12,
            "1080p60 webcam with adaptive light sensor",
            &[("resolution", "1920x1080"), ("fps", "60")],
        ),
        item(
            "Pebble",
            "Creative",
            Category::Speaker,
            590_000.0,
            35,
            "Compact USB-powered 2.0 desktop speakers",
            &[("power", "4.4 W RMS"), ("connection", "USB / 3.5 mm")],
        ),
        item(
            "Nommo Chroma",
            "Razer",
            Category::Speaker,
            3_490_000.0,
            5,
            "2.0 gaming speakers with rear-projected lighting",
            &[("driver", "3 inch"), ("connection", "USB / 3.5 mm")],
        ),
        item(
            "Z407",
            "Logitech",
            Category::Speaker,
            1_990_000.0,
            16,
            "Bluetooth 2.1 speakers with wireless control dial",
            &[("power", "80 W peak"), ("connection", "Bluetooth / USB / 3.5 mm")],
        ),
    ]
}
