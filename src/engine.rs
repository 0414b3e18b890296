use crate::batch::{InputBatch, InputRecord, OutputRow};
use crate::calendar;
use crate::config::Configuration;
use crate::errors::{FatalError, RecordError, Stage};
use crate::ordering;
use crate::terms::TermsDispatcher;
use crate::validator::RecordValidator;
use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

/// Either the complete, sorted set of output rows, or the reason the run was
/// aborted. There is never a partial row set alongside a fatal error.
pub type ProcessingOutcome = Result<Vec<OutputRow>, FatalError>;

/// Records whose columns matched the configured schema.
struct SchemaChecked {
    records: Vec<InputRecord>,
}

/// The outcome of checking one record's invoice date.
enum DateCheck {
    /// The date was invalid; the row carries the error message.
    Rejected(OutputRow),

    /// The date was valid and the record may be dispatched.
    Accepted { record: InputRecord, date: NaiveDate },
}

/// Every record, in file order, after its date has been checked.
struct DatesChecked {
    entries: Vec<DateCheck>,
}

/// All success and error rows, in file order.
struct Collected {
    rows: Vec<OutputRow>,
}

impl Collected {
    fn sorted(mut self) -> Vec<OutputRow> {
        ordering::sort_rows(&mut self.rows);
        self.rows
    }
}

/// Turns a batch of invoice records into due-date rows.
///
/// The pipeline runs its stages strictly in order: empty check, schema check,
/// per-record date check, terms dispatch, then sorting. Each stage consumes
/// the previous stage's result, so a later stage is only ever reached when
/// everything before it succeeded.
pub struct Pipeline<'a> {
    config: &'a Configuration,
    validator: RecordValidator<'a>,
    dispatcher: TermsDispatcher<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            validator: RecordValidator::new(config),
            dispatcher: TermsDispatcher::new(config),
        }
    }

    /// Processes a whole batch.
    ///
    /// Invalid dates and unknown or disallowed terms codes produce error rows
    /// and processing continues. An empty batch, a column mismatch, or a
    /// malformed record aborts the run with a [`FatalError`].
    pub fn run(&self, batch: InputBatch) -> ProcessingOutcome {
        let _span = info_span!("pipeline", records = batch.records.len()).entered();

        let batch = ensure_not_empty(batch)?;

        info!("checking input columns");
        let checked = self.check_schema(batch)?;

        info!("checking invoice dates");
        let dated = self
            .check_dates(checked)
            .map_err(FatalError::at(Stage::PerRecordDateCheck))?;

        info!("computing due dates");
        let collected = self
            .dispatch(dated)
            .map_err(FatalError::at(Stage::Dispatch))?;

        info!(rows = collected.rows.len(), "sorting output");
        Ok(collected.sorted())
    }

    /// Verify the file declares exactly the configured input columns.
    ///
    /// A mismatch is fatal: no record of a malformed file is processed.
    fn check_schema(&self, batch: InputBatch) -> Result<SchemaChecked, FatalError> {
        if !self.validator.validate_schema(&batch.columns) {
            return Err(FatalError::SchemaMismatch {
                columns: batch.columns,
            });
        }

        Ok(SchemaChecked {
            records: batch.records,
        })
    }

    /// Check the invoice date of every record.
    ///
    /// A record with an invalid date becomes an error row and is not
    /// dispatched. A record missing the id or date column is a fault.
    fn check_dates(&self, checked: SchemaChecked) -> Result<DatesChecked, RecordError> {
        let mut entries = Vec::with_capacity(checked.records.len());

        for record in checked.records {
            match self.validator.validate_record_date(&record)? {
                Some(date) => entries.push(DateCheck::Accepted { record, date }),
                None => {
                    let id = record.get(self.config.id_field())?;
                    let invoice_date = record.get(self.config.date_field())?;
                    let message = format!("Invalid Date at ID {}: {}", id, invoice_date);
                    warn!(row = record.row(), "{}", message);
                    entries.push(DateCheck::Rejected(OutputRow::new(
                        id,
                        invoice_date,
                        message,
                    )));
                }
            }
        }

        Ok(DatesChecked { entries })
    }

    /// Compute the due date of every record that passed the date check.
    ///
    /// Rows rejected earlier are carried through in place so the collected
    /// rows keep the order of the input file.
    fn dispatch(&self, dated: DatesChecked) -> Result<Collected, RecordError> {
        let mut rows = Vec::with_capacity(dated.entries.len());

        for entry in dated.entries {
            let row = match entry {
                DateCheck::Rejected(row) => row,
                DateCheck::Accepted { record, date } => self.dispatch_record(&record, date)?,
            };
            rows.push(row);
        }

        Ok(Collected { rows })
    }

    fn dispatch_record(
        &self,
        record: &InputRecord,
        date: NaiveDate,
    ) -> Result<OutputRow, RecordError> {
        let id = record.get(self.config.id_field())?;
        let invoice_date = record.get(self.config.date_field())?;
        let code = record.get(self.config.terms_field())?;

        match self.dispatcher.classify(code) {
            Some(rule) => {
                let due = calendar::format_date(rule.due_date(date)?);
                debug!(
                    row = record.row(),
                    id,
                    invoice_date,
                    rule = rule.code(),
                    due = %due,
                    "computed due date"
                );
                Ok(OutputRow::new(id, invoice_date, due))
            }
            None => {
                let message = format!("Invalid Mode at ID {}: {}", id, code);
                warn!(row = record.row(), "{}", message);
                Ok(OutputRow::new(id, invoice_date, message))
            }
        }
    }
}

fn ensure_not_empty(batch: InputBatch) -> Result<InputBatch, FatalError> {
    if batch.is_empty() {
        return Err(FatalError::EmptyInput);
    }

    Ok(batch)
}
