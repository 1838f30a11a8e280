//! `PostgreSQL` repository implementation for the machine inventory.

use super::{
    models::{MachineChangeset, MachineRow, NewMachineRow},
    schema::machines,
};
use crate::machine::{
    domain::{
        Machine, MachineFilter, MachineId, MachineName, NewMachine, PersistedMachineData,
        ValidityWindow,
    },
    ports::{MachineRepository, MachineRepositoryError, MachineRepositoryResult},
};
use crate::persistence::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;

/// `PostgreSQL`-backed machine repository.
#[derive(Debug, Clone)]
pub struct PostgresMachineRepository {
    pool: PgPool,
}

impl PostgresMachineRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MachineRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MachineRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MachineRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MachineRepositoryError::persistence)?
    }
}

#[async_trait]
impl MachineRepository for PostgresMachineRepository {
    async fn insert(&self, machine: &NewMachine) -> MachineRepositoryResult<Machine> {
        let validity = machine.validity();
        let new_row = NewMachineRow {
            name: machine.name().as_str().to_owned(),
            category: machine.category().map(str::to_owned),
            valid_from_datetime: validity.starts_at(),
            valid_to_datetime: validity.ends_at(),
            aktiv: aktiv_flag(machine.is_active()),
            created_at: machine.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(machines::table)
                .values(&new_row)
                .returning(MachineRow::as_returning())
                .get_result::<MachineRow>(connection)
                .map_err(MachineRepositoryError::persistence)?;
            row_to_machine(row)
        })
        .await
    }

    async fn update(&self, machine: &Machine) -> MachineRepositoryResult<()> {
        let machine_id = machine.id();
        let validity = machine.validity();
        let changeset = MachineChangeset {
            name: machine.name().as_str().to_owned(),
            category: machine.category().map(str::to_owned),
            valid_from_datetime: validity.starts_at(),
            valid_to_datetime: validity.ends_at(),
            aktiv: aktiv_flag(machine.is_active()),
        };

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(machines::table.find(machine_id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(MachineRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(MachineRepositoryError::NotFound(machine_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MachineId) -> MachineRepositoryResult<Option<Machine>> {
        self.run_blocking(move |connection| {
            let row = machines::table
                .find(id.value())
                .select(MachineRow::as_select())
                .first::<MachineRow>(connection)
                .optional()
                .map_err(MachineRepositoryError::persistence)?;
            row.map(row_to_machine).transpose()
        })
        .await
    }

    async fn list(&self, filter: &MachineFilter) -> MachineRepositoryResult<Vec<Machine>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = machines::table
                .select(MachineRow::as_select())
                .into_boxed();
            if let Some(category) = criteria.category() {
                query = query.filter(machines::category.eq(category.to_owned()));
            }
            if let Some(active) = criteria.active() {
                query = query.filter(machines::aktiv.eq(aktiv_flag(active)));
            }

            let rows = query
                .order((machines::aktiv.desc(), machines::name.asc(), machines::id.asc()))
                .load::<MachineRow>(connection)
                .map_err(MachineRepositoryError::persistence)?;
            rows.into_iter().map(row_to_machine).collect()
        })
        .await
    }

    async fn categories(&self) -> MachineRepositoryResult<Vec<String>> {
        self.run_blocking(move |connection| {
            let stored = machines::table
                .select(machines::category)
                .filter(machines::category.is_not_null())
                .distinct()
                .load::<Option<String>>(connection)
                .map_err(MachineRepositoryError::persistence)?;
            let categories: BTreeSet<String> = stored
                .into_iter()
                .flatten()
                .filter(|category| !category.trim().is_empty())
                .collect();
            Ok(categories.into_iter().collect())
        })
        .await
    }

    async fn count(&self) -> MachineRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = machines::table
                .count()
                .get_result::<i64>(connection)
                .map_err(MachineRepositoryError::persistence)?;
            u64::try_from(total).map_err(MachineRepositoryError::persistence)
        })
        .await
    }
}

fn aktiv_flag(active: bool) -> i32 {
    i32::from(active)
}

fn row_to_machine(row: MachineRow) -> MachineRepositoryResult<Machine> {
    let MachineRow {
        id,
        name,
        category,
        valid_from_datetime,
        valid_to_datetime,
        aktiv,
        created_at,
    } = row;

    let parsed_name = MachineName::new(name).map_err(MachineRepositoryError::persistence)?;

    Ok(Machine::from_persisted(PersistedMachineData {
        id: MachineId::new(id),
        name: parsed_name,
        category,
        validity: ValidityWindow::from_stored(valid_from_datetime, valid_to_datetime),
        active: aktiv != 0,
        created_at,
    }))
}
