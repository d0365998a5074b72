//! Built-in recipe catalog.
//!
//! A small set of guided recipes covering every engine feature: the
//! fried egg (per-unit flow), fried potatoes (stir and retire cues),
//! white rice (fire-level transitions and a long continuous timer), and
//! the boiled egg (boil vocabulary, no looping). Imported recipes are
//! normalized through [`normalize`] before joining this catalog.

use crate::models::{
    Equipment, FireLevel, Ingredient, PortionLabels, Recipe, RecipeContent, RecipeStep, SubStep,
};

pub mod normalize;

/// Metadata for every built-in recipe, in menu order.
pub fn catalog() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "huevo-frito".to_string(),
            name: "Huevo frito".to_string(),
            icon: "🍳".to_string(),
            ingredient: "Huevos".to_string(),
            description: "5 pasos · automático".to_string(),
            equipment: Equipment::Stove,
            unit_flow: true,
        },
        Recipe {
            id: "papas-fritas".to_string(),
            name: "Papas fritas".to_string(),
            icon: "🍟".to_string(),
            ingredient: "Papas".to_string(),
            description: "Movimiento guiado · 7-9 min".to_string(),
            equipment: Equipment::Stove,
            unit_flow: false,
        },
        Recipe {
            id: "arroz-blanco".to_string(),
            name: "Arroz blanco".to_string(),
            icon: "🍚".to_string(),
            ingredient: "Porciones".to_string(),
            description: "6 pasos · 30-40 min".to_string(),
            equipment: Equipment::Stove,
            unit_flow: false,
        },
        Recipe {
            id: "huevo-sancochado".to_string(),
            name: "Huevo sancochado".to_string(),
            icon: "🥚".to_string(),
            ingredient: "Huevos".to_string(),
            description: "4 pasos · 12-15 min".to_string(),
            equipment: Equipment::Stove,
            unit_flow: false,
        },
    ]
}

/// Content for a built-in recipe id.
pub fn content_for(id: &str) -> Option<RecipeContent> {
    match id {
        "huevo-frito" => Some(huevo_frito()),
        "papas-fritas" => Some(papas_fritas()),
        "arroz-blanco" => Some(arroz_blanco()),
        "huevo-sancochado" => Some(huevo_sancochado()),
        _ => None,
    }
}

fn huevo_frito() -> RecipeContent {
    RecipeContent {
        ingredients: vec![
            Ingredient::new("Huevos", "🥚", true, ["1 huevo", "2 huevos", "4 huevos"]),
            Ingredient::new("Aceite", "🫒", true, ["2 cdas", "3 cdas", "4 cdas"]),
            Ingredient::new("Sal", "🧂", false, ["Al gusto", "Al gusto", "Al gusto"]),
        ],
        steps: vec![
            RecipeStep::new(1, "Precalentado", FireLevel::Medium).with_sub_steps(vec![
                SubStep::action("Precalentar sartén", "Usa sartén antiadherente a fuego medio."),
                SubStep::timer("Precalentando...", "La sartén debe quedar bien caliente.", [45, 55, 65]),
            ]),
            RecipeStep::new(2, "Calentar aceite", FireLevel::Medium).with_sub_steps(vec![
                SubStep::amount("Agregar aceite", "Cantidad:", ["2 cdas", "3 cdas", "4 cdas"]),
                SubStep::timer("Calentando aceite...", "Debe estar caliente sin humear.", [25, 35, 45]),
            ]),
            RecipeStep::new(3, "Freír huevo 1", FireLevel::Medium).with_sub_steps(vec![
                SubStep::action("Incorporar el primer huevo", "Rompe el huevo con cuidado."),
                SubStep::timer(
                    "Dorar el primer lado",
                    "Cocina por el primer lado. El recordatorio indicará cuándo girar.",
                    [10, 10, 10],
                ),
                SubStep::timer(
                    "Voltear y dorar el reverso",
                    "Después del giro, termina la cocción del lado B.",
                    [10, 10, 10],
                ),
                SubStep::action("Retirar huevo 1", "Lleva al plato y mantenlo tibio."),
            ]),
            RecipeStep::new(4, "Freír huevo 2", FireLevel::Medium).with_sub_steps(vec![
                SubStep::timer(
                    "Dorar el primer lado",
                    "Cocina por el primer lado. El recordatorio indicará cuándo girar.",
                    [10, 10, 10],
                ),
                SubStep::timer(
                    "Voltear y dorar el reverso",
                    "Después del giro, termina la cocción del lado B.",
                    [10, 10, 10],
                ),
                SubStep::action("Retirar huevo 2", "Lleva al plato para servir."),
            ]),
            RecipeStep::new(5, "Finalizar", FireLevel::Medium).with_sub_steps(vec![
                SubStep::action("Servir huevos", "Apaga el fuego, agrega sal y sirve."),
            ]),
        ],
        tip: "Ten todo listo antes de empezar. El secreto está en el aceite bien caliente y no \
              tocar el huevo mientras se cocina la primera cara."
            .to_string(),
        portion_labels: PortionLabels::new("huevo", "huevos"),
    }
}

fn papas_fritas() -> RecipeContent {
    RecipeContent {
        ingredients: vec![
            Ingredient::new("Papas", "🥔", true, ["1 papa grande", "2 papas", "4 papas"]),
            Ingredient::new("Aceite", "🫒", true, ["2 cdas", "4 cdas", "8 cdas"]),
            Ingredient::new("Sal", "🧂", false, ["Al gusto", "Al gusto", "Al gusto"]),
        ],
        steps: vec![
            RecipeStep::new(1, "Preparación", FireLevel::Medium).with_sub_steps(vec![
                SubStep::action(
                    "Cortar las papas en bastones",
                    "Haz cortes parejos para que se cocinen uniforme.",
                ),
                SubStep::action(
                    "Secar y salar ligeramente",
                    "Retira humedad para que queden crocantes.",
                ),
            ]),
            RecipeStep::new(2, "Precalentar aceite", FireLevel::High).with_sub_steps(vec![
                SubStep::timer("Calentar aceite", "Aceite caliente sin humear.", [40, 50, 60]),
            ]),
            RecipeStep::new(3, "Cocción", FireLevel::High).with_sub_steps(vec![
                SubStep::action(
                    "Incorporar papas",
                    "Muévelas apenas entren para que no se peguen entre sí ni al fondo.",
                ),
                SubStep::timer(
                    "Dorar primer tramo",
                    "Comienza la fritura hasta un dorado ligero.",
                    [75, 90, 120],
                ),
                SubStep::timer(
                    "Dorar segundo tramo",
                    "Tras moverlas, continúa hasta color más parejo.",
                    [75, 90, 120],
                ),
                SubStep::timer(
                    "Crocancia final",
                    "Último tramo corto para lograr textura crujiente.",
                    [40, 50, 60],
                ),
                SubStep::action(
                    "Tanda completada",
                    "Retira, escurre y prepárate para la siguiente tanda.",
                ),
            ]),
        ],
        tip: "No sobrecargues la sartén para mantener la temperatura del aceite.".to_string(),
        portion_labels: PortionLabels::new("papa", "papas"),
    }
}

fn arroz_blanco() -> RecipeContent {
    RecipeContent {
        ingredients: vec![
            Ingredient::new("Arroz", "🍚", true, ["1 taza", "2 tazas", "4 tazas"]),
            Ingredient::new("Agua", "💧", true, ["1 ½ tazas", "3 tazas", "5 ½ tazas"]),
            Ingredient::new("Aceite", "🫒", true, ["1-2 cdtas", "1 cda", "2 cdas"]),
            Ingredient::new("Ajo picado", "🧄", false, ["1-2 cdtas", "1 cda", "2 cdas"]),
            Ingredient::new("Sal", "🧂", false, ["Al gusto", "Al gusto", "Al gusto"]),
        ],
        steps: vec![
            RecipeStep::new(1, "Precalentado", FireLevel::High).with_sub_steps(vec![
                SubStep::action(
                    "Colocar olla a fuego medio alto",
                    "Usa una olla con buen fondo para calor uniforme.",
                ),
                SubStep::timer(
                    "Precalentando...",
                    "La olla debe estar bien seca antes del aceite.",
                    [60, 90, 120],
                ),
            ]),
            RecipeStep::new(2, "Calentar aceite", FireLevel::High).with_sub_steps(vec![
                SubStep::amount("Agregar aceite", "Cantidad:", ["1-2 cdtas", "1 cda", "2 cdas"]),
                SubStep::timer(
                    "Calentando aceite...",
                    "El aceite debe estar fluido, no humeando.",
                    [40, 50, 60],
                ),
            ]),
            RecipeStep::new(3, "Sofreír ajo", FireLevel::High).with_sub_steps(vec![
                SubStep::amount("Agregar ajo", "Cantidad:", ["1-2 cdtas", "1 cda", "2 cdas"]),
                SubStep::timer("Friendo...", "Mueve el ajo para que no se amargue.", [60, 60, 80]),
            ]),
            RecipeStep::new(4, "Cocción", FireLevel::High).with_sub_steps(vec![
                SubStep::amount("Agregar el arroz", "Cantidad:", ["1 Taza", "2 Tazas", "4 Tazas"]),
                SubStep::timer(
                    "Echa el arroz y revuelve",
                    "Mezcla hasta que el grano brille (Nacarado).",
                    [60, 90, 120],
                ),
                SubStep::amount(
                    "Agregar agua",
                    "Cantidad (Agua):",
                    ["1 ½ Tazas", "3 Tazas", "5 ½ Tazas"],
                ),
                SubStep::action("Agregar sal y remover", "Prueba el agua; debe estar algo salada."),
                SubStep::timer(
                    "Cocinando (seca agua)",
                    "Sin tapa. Hasta ver \"huequitos\" arriba.",
                    [380, 540, 840],
                ),
            ]),
            RecipeStep::new(5, "Graneado", FireLevel::Low).with_sub_steps(vec![
                SubStep::action("Baja el fuego", "Fuego al mínimo absoluto (fuego corona)."),
                SubStep::action("Mueve el arroz", "Usa tenedor para airear de abajo hacia arriba."),
                SubStep::timer("Pon la tapa", "El vapor termina la cocción del centro.", [960, 1080, 1200]),
            ]),
            RecipeStep::new(6, "Asentando", FireLevel::Low).with_sub_steps(vec![
                SubStep::action("Apagar el fuego", "Vital para que el arroz no esté pegajoso."),
                SubStep::timer("Terminando", "No destapes. Deja que el calor estabilice.", [300, 420, 600]),
            ]),
        ],
        tip: "Prepara todos los ingredientes antes de empezar. La clave del arroz perfecto está \
              en los tiempos de cocción, así que ten todo listo."
            .to_string(),
        portion_labels: PortionLabels::new("taza", "tazas"),
    }
}

fn huevo_sancochado() -> RecipeContent {
    RecipeContent {
        ingredients: vec![
            Ingredient::new("Huevos", "🥚", true, ["1 huevo", "2 huevos", "4 huevos"]),
            Ingredient::new("Agua", "💧", true, ["500 ml", "700 ml", "1 L"]),
            Ingredient::new("Sal", "🧂", false, ["Pizca", "Pizca", "Pizca"]),
        ],
        steps: vec![
            RecipeStep::new(1, "Hervir agua", FireLevel::High).with_sub_steps(vec![
                SubStep::action("Agregar agua a la olla", "Cubre por completo los huevos."),
                SubStep::timer("Llevar a ebullición", "Agua burbujeando.", [240, 300, 360]),
            ]),
            RecipeStep::new(2, "Cocción", FireLevel::Medium).with_sub_steps(vec![
                SubStep::action("Añadir huevos con cuidado", "Usa cuchara para no romper."),
                SubStep::timer("Cocinar huevos", "Para yema semidura.", [540, 540, 540]),
            ]),
            RecipeStep::new(3, "Enfriado", FireLevel::Low).with_sub_steps(vec![
                SubStep::action("Pasar a agua fría", "Detén cocción."),
                SubStep::timer("Reposar en agua fría", "Facilita pelado.", [120, 120, 120]),
            ]),
            RecipeStep::new(4, "Final", FireLevel::Low).with_sub_steps(vec![
                SubStep::action("Pelar y servir", "Sazonar al gusto."),
            ]),
        ],
        tip: "Controla el tiempo exacto para obtener la textura de yema que prefieras.".to_string(),
        portion_labels: PortionLabels::new("huevo", "huevos"),
    }
}
