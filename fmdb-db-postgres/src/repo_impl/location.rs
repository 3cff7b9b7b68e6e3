use super::*;

impl LocationRepo for Db {
    fn get_location(&self, id: LocationId) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn create_location(&self, location: NewLocation) -> Result<LocationId> {
        create_location(&mut self.conn.borrow_mut(), location)
    }
}

fn location_from_row(row: models::LocationRow) -> Location {
    Location {
        id: row.id.into(),
        street: row.street,
        city: row.city,
        county: row.county,
        state: row.state,
        zip: row.zip,
    }
}

fn get_location(conn: &mut PgConnection, id: LocationId) -> Result<Location> {
    let row = schema::locations::table
        .find(id.value())
        .first::<models::LocationRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(location_from_row(row))
}

fn create_location(conn: &mut PgConnection, location: NewLocation) -> Result<LocationId> {
    let NewLocation {
        street,
        city,
        county,
        state,
        zip,
    } = location;
    let new_row = models::NewLocationRow {
        street,
        city,
        county,
        state,
        zip,
    };
    let id = diesel::insert_into(schema::locations::table)
        .values(&new_row)
        .returning(schema::locations::id)
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(id.into())
}
