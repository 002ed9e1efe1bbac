use std::cmp::Ordering;

use super::MenuItem;
use crate::options::compare_base;

/// Type filter value that shows every section.
pub const ALL_MENU_TYPES: &str = "Todos";
/// Section for dishes without a type.
pub const UNTYPED_SECTION: &str = "Otros";

/// A heading on the menu and its dishes in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection<'a> {
    pub name: String,
    pub items: Vec<&'a MenuItem>,
}

fn item_types(item: &MenuItem) -> impl Iterator<Item = &str> {
    item.types.iter().map(|t| t.trim()).filter(|t| !t.is_empty())
}

fn belongs_to(item: &MenuItem, section: &str) -> bool {
    let mut types = item_types(item).peekable();
    if types.peek().is_none() {
        return section == UNTYPED_SECTION;
    }
    types.any(|t| t == section)
}

fn by_position(a: &&MenuItem, b: &&MenuItem) -> Ordering {
    a.sort_index
        .unwrap_or(0)
        .cmp(&b.sort_index.unwrap_or(0))
        .then_with(|| compare_base(&a.name, &b.name))
}

/// Section names present on the menu: the restaurant's preferred order first,
/// the rest alphabetically.
pub(super) fn ordered_types(items: &[MenuItem], preferred: &[String]) -> Vec<String> {
    let mut present: Vec<&str> = Vec::new();
    for t in items.iter().flat_map(item_types) {
        if !present.contains(&t) {
            present.push(t);
        }
    }

    let mut ordered: Vec<String> = Vec::new();
    for t in preferred.iter().map(|t| t.trim()) {
        if present.contains(&t) && !ordered.iter().any(|o| o == t) {
            ordered.push(t.to_string());
        }
    }
    let mut rest: Vec<&str> = present
        .into_iter()
        .filter(|t| !ordered.iter().any(|o| o == t))
        .collect();
    rest.sort_by(|a, b| compare_base(a, b));
    ordered.extend(rest.into_iter().map(str::to_string));
    ordered
}

/// With [`ALL_MENU_TYPES`] every section is returned, untyped dishes last;
/// any other filter yields just that section, possibly empty.
pub(super) fn sections<'a>(
    items: &'a [MenuItem],
    preferred: &[String],
    filter: &str,
) -> Vec<MenuSection<'a>> {
    let names = if filter == ALL_MENU_TYPES {
        let mut names = ordered_types(items, preferred);
        let has_untyped = items.iter().any(|i| item_types(i).next().is_none());
        if has_untyped && !names.iter().any(|n| n == UNTYPED_SECTION) {
            names.push(UNTYPED_SECTION.to_string());
        }
        names
    } else {
        vec![filter.to_string()]
    };

    names
        .into_iter()
        .map(|name| {
            let mut dishes: Vec<&MenuItem> =
                items.iter().filter(|i| belongs_to(i, &name)).collect();
            dishes.sort_by(by_position);
            MenuSection { name, items: dishes }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new(1, "Tarta de queso").with_types(&["Postres"]).with_sort_index(2),
            MenuItem::new(2, "Croquetas").with_types(&["Entrantes", "Para compartir"]),
            MenuItem::new(3, "Arroz negro").with_types(&["Arroces"]).with_sort_index(1),
            MenuItem::new(4, "Flan").with_types(&["Postres"]).with_sort_index(1),
            MenuItem::new(5, "Agua"),
            MenuItem::new(6, "Ensaladilla").with_types(&["Entrantes"]),
            MenuItem::new(7, "Ñoras fritas").with_types(&["Entrantes"]),
        ]
    }

    fn names(sections: &[MenuSection<'_>]) -> Vec<String> {
        sections.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn preferred_order_then_alphabetical() {
        let preferred = vec![
            "Entrantes".to_string(),
            "Carnes".to_string(),
            " Postres ".to_string(),
        ];
        assert_eq!(
            ordered_types(&menu(), &preferred),
            ["Entrantes", "Postres", "Arroces", "Para compartir"]
        );
    }

    #[test]
    fn without_preference_sections_are_alphabetical() {
        let m = menu();
        let sections = sections(&m, &[], ALL_MENU_TYPES);
        assert_eq!(
            names(&sections),
            ["Arroces", "Entrantes", "Para compartir", "Postres", "Otros"]
        );
        assert_eq!(sections[4].items[0].name, "Agua");
    }

    #[test]
    fn dishes_sort_by_index_then_name() {
        let m = menu();
        let sections = sections(&m, &[], ALL_MENU_TYPES);
        let postres: Vec<_> = sections[3].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(postres, ["Flan", "Tarta de queso"]);
        let entrantes: Vec<_> = sections[1].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(entrantes, ["Croquetas", "Ensaladilla", "Ñoras fritas"]);
    }

    #[test]
    fn a_dish_appears_under_each_of_its_types() {
        let m = menu();
        let sections = sections(&m, &[], ALL_MENU_TYPES);
        let croquetas = sections
            .iter()
            .filter(|s| s.items.iter().any(|i| i.name == "Croquetas"))
            .count();
        assert_eq!(croquetas, 2);
    }

    #[test]
    fn type_filter_returns_one_section() {
        let m = menu();
        let only = sections(&m, &[], "Postres");
        assert_eq!(names(&only), ["Postres"]);
        assert_eq!(only[0].items.len(), 2);

        let m = menu();
        let missing = sections(&m, &[], "Carnes");
        assert_eq!(names(&missing), ["Carnes"]);
        assert!(missing[0].items.is_empty());
    }
}
