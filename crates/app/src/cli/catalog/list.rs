use clap::Args;
use hotel_app::{
    database::DatabaseConfig,
    domain::rooms::{RoomsService, records::RoomRecord},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: ListArgs) -> Result<(), String> {
    let service = super::rooms_service(&args.database).await?;

    let rooms = service
        .list_rooms()
        .await
        .map_err(|error| format!("failed to list rooms: {error}"))?;

    if rooms.is_empty() {
        println!("no rooms found; run `hotel-app catalog seed` first");
        return Ok(());
    }

    println!("{}", rooms_table(&rooms));

    Ok(())
}

fn rooms_table(rooms: &[RoomRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Room", "Type", "Guests", "Price"]);

    for room in rooms {
        builder.push_record([
            room.number.to_string(),
            room.room_type.name.clone(),
            room.room_type.guest_capacity.to_string(),
            room.room_type.price.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    table.to_string()
}
