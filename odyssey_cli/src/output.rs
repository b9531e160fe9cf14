use std::{
    io::{BufWriter, Write},
    path::Path,
};

use comfy_table::{Table, presets::UTF8_FULL};
use odyssey_optimizer::{problem::location_set::LocationSet, tsp::tour::Tour};
use serde::Serialize;

pub fn tour_table(tour: &Tour, locations: &LocationSet) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Location", "X / Lon", "Y / Lat", "Leg cost"]);

    let mut legs = tour.arcs().iter();
    for (position, &stop) in tour.stops().iter().enumerate() {
        let location = locations.location(stop);
        let leg = if position == 0 {
            String::from("-")
        } else {
            legs.next()
                .map_or_else(|| String::from("-"), |arc| format!("{:.2}", arc.cost()))
        };

        table.add_row(vec![
            position.to_string(),
            stop.to_string(),
            format!("{:.6}", location.x()),
            format!("{:.6}", location.y()),
            leg,
        ]);
    }

    table
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;

    Ok(())
}
