use leetboard_database::SnapshotStore;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub store: SnapshotStore,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
