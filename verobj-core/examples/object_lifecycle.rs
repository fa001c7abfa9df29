//! 记录生命周期演示：首次保存、未变化保存、修改后保存、分组事务与读取
//!
//! 运行：`RUST_LOG=verobj_core=debug cargo run -p verobj-core --example object_lifecycle`

use tracing_subscriber::EnvFilter;
use verobj_core::error::ObjectError;
use verobj_core::persist::{
    IdScheme, InMemoryDocumentStore, MemoryStoreConfig, ObjectRepository, SaveOutcome,
    run_in_transaction, save,
};
use verobj_core::record::{RecordMeta, Versioned};
use verobj_core::versioned;

#[versioned]
struct Board {
    title: String,
}

#[versioned]
struct Card {
    text: String,
    done: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = InMemoryDocumentStore::with_config(
        MemoryStoreConfig::builder().id_scheme(IdScheme::Hex).build(),
    );
    let repo = ObjectRepository::new(store.clone());

    let mut board = Board::from_meta(RecordMeta::new("board", ""));
    board.title = "backlog".into();
    let outcome = repo.save(&mut board).await?;
    tracing::info!(key = %board.key(), version = %board.meta().version(), ?outcome, "board saved");

    let outcome = repo.save(&mut board).await?;
    assert_eq!(outcome, SaveOutcome::Unchanged);
    tracing::info!(key = %board.key(), ?outcome, "board saved again without changes");

    board.title = "sprint 1".into();
    let outcome = repo.save(&mut board).await?;
    tracing::info!(
        key = %board.key(),
        version = %board.meta().version(),
        modified_at = ?board.meta().modified_at(),
        ?outcome,
        "board renamed"
    );

    // 在事务中一次性创建同一分组下的多张卡片
    let group = board.meta().entity().clone();
    let cards = run_in_transaction(&store, move |tx| {
        Box::pin(async move {
            let mut saved = Vec::new();
            for text in ["write docs", "ship release"] {
                let mut card = Card::from_meta(RecordMeta::new("card", "").with_group(group.clone()));
                card.text = text.into();
                save(tx, &mut card).await?;
                saved.push(card);
            }
            Ok::<_, ObjectError>(saved)
        })
    })
    .await?;

    for card in &cards {
        let mut read = Card::from_meta(
            RecordMeta::new("card", card.meta().id()).with_group(board.meta().entity().clone()),
        );
        repo.get(&mut read).await?;
        tracing::info!(key = %read.key(), text = %read.text, done = read.done, "card loaded");
    }

    tracing::info!(documents = store.len().await, "done");
    Ok(())
}
