mod bills;
mod health;
mod receipts;
