//! In-memory [`Gateway`] for view tests. Mirrors the API's ordering and
//! rename/delete semantics and records every call.

use std::sync::Mutex;

use async_trait::async_trait;
use stockroom_core::inventory::{Sector, Transaction, TransactionDraft};

use crate::error::ClientError;
use crate::gateway::Gateway;

#[derive(Debug, Default)]
struct State {
    sectors: Vec<Sector>,
    transactions: Vec<Transaction>,
    next_id: u64,
    failing: bool,
    calls: Vec<&'static str>,
}

#[derive(Debug, Default)]
pub struct FakeGateway {
    state: Mutex<State>,
}

impl FakeGateway {
    pub fn with_sectors(names: &[&str]) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            for name in names {
                state.next_id += 1;
                let id = state.next_id.to_string();
                state.sectors.push(Sector {
                    id,
                    name: (*name).to_string(),
                });
            }
        }
        fake
    }

    pub fn seed_transaction(&self, draft: TransactionDraft) -> Transaction {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let tx = Transaction::from_draft(state.next_id.to_string(), draft);
        state.transactions.push(tx.clone());
        tx
    }

    /// Make every subsequent call fail with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored_transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn stored_sectors(&self) -> Vec<Sector> {
        self.state.lock().unwrap().sectors.clone()
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing {
            return Err(ClientError::Status {
                status: 500,
                body: r#"{"error":"An internal error occurred","code":"INTERNAL_ERROR"}"#.into(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn list_sectors(&self) -> Result<Vec<Sector>, ClientError> {
        let state = self.enter("list_sectors")?;
        let mut sectors = state.sectors.clone();
        sectors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sectors)
    }

    async fn create_sector(&self, name: &str) -> Result<Sector, ClientError> {
        let mut state = self.enter("create_sector")?;
        state.next_id += 1;
        let sector = Sector {
            id: state.next_id.to_string(),
            name: name.to_string(),
        };
        state.sectors.push(sector.clone());
        Ok(sector)
    }

    async fn rename_sector(&self, sector: &Sector) -> Result<u64, ClientError> {
        let mut state = self.enter("rename_sector")?;
        for existing in state.sectors.iter_mut().filter(|s| s.id == sector.id) {
            existing.name = sector.name.clone();
        }
        let mut rewritten = 0;
        for tx in state
            .transactions
            .iter_mut()
            .filter(|t| t.sector_id.as_deref() == Some(sector.id.as_str()))
        {
            tx.sector_name = sector.name.clone();
            rewritten += 1;
        }
        Ok(rewritten)
    }

    async fn delete_sector(&self, id: &str) -> Result<u64, ClientError> {
        let mut state = self.enter("delete_sector")?;
        state.sectors.retain(|s| s.id != id);
        let linked = state
            .transactions
            .iter()
            .filter(|t| t.sector_id.as_deref() == Some(id))
            .count();
        Ok(linked as u64)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        let state = self.enter("list_transactions")?;
        let mut transactions = state.transactions.clone();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.timestamp.cmp(&a.timestamp)));
        Ok(transactions)
    }

    async fn add_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ClientError> {
        let mut state = self.enter("add_transaction")?;
        state.next_id += 1;
        let tx = Transaction::from_draft(state.next_id.to_string(), draft.clone());
        state.transactions.push(tx.clone());
        Ok(tx)
    }

    async fn update_transaction(&self, tx: &Transaction) -> Result<(), ClientError> {
        let mut state = self.enter("update_transaction")?;
        for existing in state.transactions.iter_mut().filter(|t| t.id == tx.id) {
            *existing = tx.clone();
        }
        Ok(())
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.enter("delete_transaction")?;
        state.transactions.retain(|t| t.id != id);
        Ok(())
    }
}
