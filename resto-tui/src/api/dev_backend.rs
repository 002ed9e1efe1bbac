use resto_search::{Locality, MemoryBackend, MenuItem, Row, Schedule, ScheduleRule};
use std::time::Duration;

/// Base latency of the dev catalog. Short terms wait up to four times longer
/// so out-of-order suggestion responses actually happen.
const DEV_LATENCY: Duration = Duration::from_millis(120);

struct Seed {
    name: &'static str,
    types: &'static [&'static str],
    cities: &'static [&'static str],
    open: bool,
    price: &'static str,
    address: &'static str,
}

#[rustfmt::skip]
const SEEDS: &[Seed] = &[
    Seed { name: "Pizzeria Roma", types: &["Pizzería", "Italiana"], cities: &["Villamartín", "Orihuela"], open: true, price: "€€", address: "Plaza Galicia 4" },
    Seed { name: "La Pizza Loca", types: &["Pizzería"], cities: &["Torrevieja"], open: true, price: "€", address: "Calle Caballero de Rodas 12" },
    Seed { name: "Pizzería Napoli", types: &["Pizzería", "Italiana"], cities: &["Orihuela"], open: false, price: "€€", address: "Avenida Duque de Tamames 3" },
    Seed { name: "Pizarro Grill", types: &["Asador", "Carnes"], cities: &["Pilar de la Horadada"], open: true, price: "€€€", address: "Calle Mayor 21" },
    Seed { name: "Bar Tapas El Rincón", types: &["Tapas", "Bar"], cities: &["Orihuela"], open: true, price: "€", address: "Calle San Pascual 7" },
    Seed { name: "Tasca La Abuela", types: &["Tapas", "Casera"], cities: &["Almoradí"], open: true, price: "€", address: "Plaza de la Constitución 2" },
    Seed { name: "Sushi Zen", types: &["Japonesa", "Sushi"], cities: &["Torrevieja"], open: true, price: "€€", address: "Paseo Vista Alegre 9" },
    Seed { name: "Sushi Kai", types: &["Japonesa", "Sushi"], cities: &["Orihuela Costa"], open: false, price: "€€€", address: "Zenia Boulevard, local 112" },
    Seed { name: "Arrocería La Marina", types: &["Arroces", "Mediterránea"], cities: &["Guardamar del Segura"], open: true, price: "€€", address: "Paseo Marítimo 15" },
    Seed { name: "Marisquería El Puerto", types: &["Marisco", "Pescado"], cities: &["Torrevieja"], open: true, price: "€€€", address: "Muelle Pescadores 1" },
    Seed { name: "Asador Castilla", types: &["Asador", "Carnes"], cities: &["Orihuela"], open: false, price: "€€€", address: "Calle López Pozas 30" },
    Seed { name: "Burger Station", types: &["Hamburguesas"], cities: &["Orihuela Costa"], open: true, price: "€", address: "Avenida Punta Prima 5" },
    Seed { name: "Smash Bros Burgers", types: &["Hamburguesas", "Americana"], cities: &["Torrevieja"], open: true, price: "€", address: "Calle Ramón Gallud 44" },
    Seed { name: "Taquería Frida", types: &["Mexicana"], cities: &["Villamartín"], open: true, price: "€€", address: "Plaza Violeta 2" },
    Seed { name: "El Mexicano Loco", types: &["Mexicana", "Tex-Mex"], cities: &["Torrevieja"], open: false, price: "€", address: "Calle Apolo 18" },
    Seed { name: "Curry House", types: &["India"], cities: &["Orihuela Costa", "Villamartín"], open: true, price: "€€", address: "Calle Jade 3" },
    Seed { name: "Taj Mahal", types: &["India"], cities: &["Torrevieja"], open: true, price: "€€", address: "Avenida Habaneras 60" },
    Seed { name: "Wok Garden", types: &["China", "Asiática"], cities: &["Almoradí"], open: true, price: "€", address: "Calle Rambla 22" },
    Seed { name: "Thai Orchid", types: &["Tailandesa", "Asiática"], cities: &["Orihuela Costa"], open: false, price: "€€", address: "La Zenia, calle Bilbao 8" },
    Seed { name: "Café Central", types: &["Cafetería", "Desayunos"], cities: &["Orihuela"], open: true, price: "€", address: "Plaza Nueva 1" },
    Seed { name: "Panadería Horno San José", types: &["Cafetería", "Panadería"], cities: &["Almoradí"], open: true, price: "€", address: "Calle San José 10" },
    Seed { name: "Heladería Valenciana", types: &["Heladería"], cities: &["Torrevieja"], open: true, price: "€", address: "Paseo Juan Aparicio 4" },
    Seed { name: "Chiringuito Cala Capitán", types: &["Chiringuito", "Mediterránea"], cities: &["Orihuela Costa"], open: true, price: "€€", address: "Cala Capitán s/n" },
    Seed { name: "Restaurante Casa Pepe", types: &["Casera", "Mediterránea"], cities: &["Bigastro"], open: false, price: "€€", address: "Calle Purísima 12" },
    Seed { name: "Mesón El Labrador", types: &["Casera", "Carnes"], cities: &["Callosa de Segura"], open: true, price: "€", address: "Avenida Constitución 40" },
    Seed { name: "Vegetariano Verde", types: &["Vegetariana", "Vegana"], cities: &["Orihuela"], open: true, price: "€€", address: "Calle Alfonso XIII 6" },
    Seed { name: "Green Bowl", types: &["Vegana", "Saludable"], cities: &["Torrevieja"], open: false, price: "€", address: "Calle Concepción 2" },
    Seed { name: "La Taberna Griega", types: &["Griega", "Mediterránea"], cities: &["Villamartín"], open: true, price: "€€", address: "Plaza Villamartín 11" },
    Seed { name: "Kebab Istanbul", types: &["Turca", "Kebab"], cities: &["Almoradí", "Orihuela"], open: true, price: "€", address: "Calle Mayor 3" },
    Seed { name: "Bodega Los Arcos", types: &["Vinos", "Tapas"], cities: &["Orihuela"], open: false, price: "€€", address: "Calle de la Feria 17" },
    Seed { name: "Cervecería La Espiga", types: &["Bar", "Tapas"], cities: &["Pilar de la Horadada"], open: true, price: "€", address: "Plaza Campoamor 5" },
    Seed { name: "Gastrobar Nómada", types: &["Fusión", "Tapas"], cities: &["Torrevieja"], open: true, price: "€€€", address: "Calle Chapaprieta 31" },
    Seed { name: "Crepería Bretona", types: &["Francesa", "Postres"], cities: &["Guardamar del Segura"], open: true, price: "€", address: "Calle Ingeniero Mira 9" },
    Seed { name: "Trattoria da Gino", types: &["Italiana"], cities: &["Orihuela Costa"], open: true, price: "€€", address: "Playa Flamenca, calle Niágara 4" },
    Seed { name: "Pasta Fresca Luigi", types: &["Italiana", "Pasta"], cities: &["Torrevieja"], open: false, price: "€€", address: "Calle Patricio Zammit 20" },
    Seed { name: "Pollos Asados Paco", types: &["Asador", "Para llevar"], cities: &["Bigastro"], open: true, price: "€", address: "Calle Virgen del Pilar 8" },
    Seed { name: "Arroz y Más", types: &["Arroces"], cities: &["Rojales"], open: true, price: "€€", address: "Calle Malecón 2" },
    Seed { name: "El Huerto de Rojales", types: &["Mediterránea", "Casera"], cities: &["Rojales"], open: false, price: "€€", address: "Camino del Río 14" },
    Seed { name: "Steakhouse Argentino", types: &["Argentina", "Carnes"], cities: &["Villamartín"], open: true, price: "€€€", address: "Calle Jacinto 1" },
    Seed { name: "Sabor Peruano", types: &["Peruana"], cities: &["Torrevieja"], open: true, price: "€€", address: "Calle Bazán 27" },
    Seed { name: "Churrería La Ermita", types: &["Desayunos", "Postres"], cities: &["Orihuela"], open: true, price: "€", address: "Calle Ermita 3" },
    Seed { name: "Poke Paradise", types: &["Hawaiana", "Saludable"], cities: &["Orihuela Costa"], open: true, price: "€€", address: "Cabo Roig, local 7" },
    Seed { name: "Vinoteca Segura", types: &["Vinos"], cities: &["Guardamar del Segura"], open: false, price: "€€€", address: "Calle Colón 2" },
    Seed { name: "Pescaíto Frito", types: &["Pescado", "Tapas"], cities: &["Torrevieja"], open: true, price: "€", address: "Paseo Marítimo Juan Aparicio 30" },
];

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn dev_rows() -> Vec<Row> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let mut row = Row::new(i as i64 + 1, seed.name)
                .with_types(seed.types)
                .with_open(seed.open);
            row.city = match seed.cities {
                [one] => Locality::One(one.to_string()),
                many => Locality::Many(many.iter().map(|c| c.to_string()).collect()),
            };
            row.price_range = Some(seed.price.to_string());
            row.address = Some(seed.address.to_string());
            row.phone = Some(format!("+34 965 {:03} {:03}", 100 + i * 7, 200 + i * 13));
            row.image_url = Some(format!("{}/cover.jpg", slug(seed.name)));
            row.pago = Some("Efectivo, tarjeta".to_string());
            if i % 3 == 0 {
                row.whatsapp = Some(format!("+34 600 {:03} {:03}", 100 + i * 3, 300 + i * 11));
            }
            if i % 2 == 0 {
                row.lat = Some(37.98 + i as f64 * 0.001);
                row.lng = Some(-0.68 - i as f64 * 0.001);
                row.menu_type_order = vec![
                    "Entrantes".to_string(),
                    "Principales".to_string(),
                    "Postres".to_string(),
                ];
            }
            row
        })
        .collect()
}

/// The same short menu for everyone, priced by position in the catalog.
fn dev_menu(index: usize, seed: &Seed) -> Vec<MenuItem> {
    let base = 6.0 + (index % 5) as f64;
    let id = |n: usize| (index * 10 + n) as i64;
    let kitchen = seed.types.first().unwrap_or(&"de la casa").to_lowercase();
    vec![
        MenuItem::new(id(1), "Croquetas caseras")
            .with_types(&["Entrantes"])
            .with_price(base + 1.5)
            .with_allergens(&["gluten", "lácteos"])
            .with_sort_index(1),
        MenuItem::new(id(2), "Ensalada de la huerta")
            .with_types(&["Entrantes"])
            .with_price(base)
            .with_sort_index(2),
        MenuItem::new(id(3), format!("Especialidad {}", kitchen))
            .with_types(&["Principales"])
            .with_price(base * 2.0 + 0.9),
        MenuItem::new(id(4), "Tarta de queso")
            .with_types(&["Postres"])
            .with_price(4.5)
            .with_allergens(&["huevo", "lácteos"]),
        MenuItem::new(id(5), "Agua mineral").with_price(1.8),
        MenuItem::new(id(6), "Plato de temporada")
            .with_types(&["Principales"])
            .with_price(base * 2.0)
            .inactive(),
    ]
}

/// The in-memory catalog used by `resto-tui dev`.
pub fn dev_backend() -> MemoryBackend {
    let mut backend = MemoryBackend::new()
        .with_rows(dev_rows())
        .with_latency(DEV_LATENCY, true);
    for (i, seed) in SEEDS.iter().enumerate() {
        let id = i as i64 + 1;
        backend = backend
            .with_rules(id, vec![ScheduleRule::new(1, 5, "13:00:00", "16:00:00")])
            .with_menu(id, dev_menu(i, seed));
        if seed.open {
            backend = backend.with_schedules(
                id,
                vec![Schedule::new(5, "20:00", "23:30"), Schedule::new(6, "13:00", "23:30")],
            );
        }
    }
    backend
}
