use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TEXT_COLUMNS: [Movies; 25] = [
    Movies::Title,
    Movies::Year,
    Movies::Rated,
    Movies::Released,
    Movies::Runtime,
    Movies::Genre,
    Movies::Director,
    Movies::Writer,
    Movies::Actors,
    Movies::Plot,
    Movies::Language,
    Movies::Country,
    Movies::Awards,
    Movies::Poster,
    Movies::Metascore,
    Movies::ImdbRating,
    Movies::ImdbVotes,
    Movies::ImdbId,
    Movies::Type,
    Movies::Dvd,
    Movies::BoxOffice,
    Movies::Production,
    Movies::Website,
    Movies::Response,
    Movies::Error,
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table.table(Movies::Table).if_not_exists();

        for column in TEXT_COLUMNS {
            table.col(ColumnDef::new(column).text());
        }

        table.col(ColumnDef::new(Movies::MessageId).integer());

        manager.create_table(table.to_owned()).await?;

        // Not unique: the message id is only a de facto key.
        manager
            .create_index(
                Index::create()
                    .name("idx_message_id")
                    .table(Movies::Table)
                    .col(Movies::MessageId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Movies {
    Table,
    Title,
    Year,
    Rated,
    Released,
    Runtime,
    Genre,
    Director,
    Writer,
    Actors,
    Plot,
    Language,
    Country,
    Awards,
    Poster,
    Metascore,
    ImdbRating,
    ImdbVotes,
    ImdbId,
    Type,
    Dvd,
    BoxOffice,
    Production,
    Website,
    Response,
    Error,
    MessageId,
}
