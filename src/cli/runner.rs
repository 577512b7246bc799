//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CsvArgs, JsonArgs, ParquetReadArgs, ParquetWriteArgs};
use crate::config::EngineConfig;
use crate::convert::{Converter, Outcome};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::output;
use crate::param::{
    Columns, Compression, CsvReadParams, HivePartitionConfig, JsonFormat, JsonReadParams,
    JsonRecords, ParquetCompression, ParquetReadParams, ParquetWriteParams,
};
use crate::schema::TableDescription;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Csv2Parquet(args) => self.csv_to_parquet(args),
            Commands::Json2Parquet(args) => self.json_to_parquet(args),
            Commands::DescribeParquet(args) => self.describe_parquet(args),
            Commands::Version => self.version(),
        }
    }

    /// Engine config from `--config`, with command line overrides applied
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.cli.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };

        if let Some(database) = &self.cli.database {
            config.database = Some(database.clone());
        }
        if let Some(engine) = &self.cli.engine {
            config.engine = engine.parse()?;
        }

        Ok(config)
    }

    fn converter(&self) -> Result<Converter> {
        Converter::connect(&self.engine_config()?)
    }

    fn csv_to_parquet(&self, args: &CsvArgs) -> Result<()> {
        let read = csv_params(args)?;
        let write = write_params(&self.cli.parquet)?;
        let dest = args.dest.as_deref().unwrap_or_default();

        let outcome = self
            .converter()?
            .csv_to_parquet(&args.source, dest, &write, &read)?;
        report(&outcome, dest);
        Ok(())
    }

    fn json_to_parquet(&self, args: &JsonArgs) -> Result<()> {
        let read = json_params(args)?;
        let write = write_params(&self.cli.parquet)?;
        let dest = args.dest.as_deref().unwrap_or_default();

        let outcome = self
            .converter()?
            .json_to_parquet(&args.source, dest, &write, &read)?;
        report(&outcome, dest);
        Ok(())
    }

    fn describe_parquet(&self, args: &ParquetReadArgs) -> Result<()> {
        let read = ParquetReadParams::new()
            .with_binary_as_string(args.binary_as_string)
            .with_file_row_number(args.file_row_number)
            .with_filename(args.filename)
            .with_hive_partitioning(args.hive_partitioning)
            .with_union_by_name(args.union_by_name);

        let description = self.converter()?.describe_parquet(&args.source, &read)?;
        print_description(&description);
        Ok(())
    }

    fn version(&self) -> Result<()> {
        println!("{} {}", crate::NAME, crate::VERSION);

        match self.converter() {
            Ok(converter) => {
                let engine = converter.engine();
                println!("duckdb {} ({})", engine.version()?, engine.name());
            }
            Err(e) => tracing::warn!("No engine available: {e}"),
        }
        Ok(())
    }
}

fn report(outcome: &Outcome, dest: &str) {
    match outcome {
        Outcome::Described(description) => print_description(description),
        Outcome::Converted => match output::parquet_row_count(dest) {
            Ok(rows) => tracing::info!("Wrote {} rows to {}", rows, dest),
            Err(e) => tracing::warn!("Could not read back {}: {}", dest, e),
        },
    }
}

fn print_description(description: &TableDescription) {
    print!("{description}");
}

// ============================================================================
// Argument Mapping
// ============================================================================

fn write_params(args: &ParquetWriteArgs) -> Result<ParquetWriteParams> {
    let compression: ParquetCompression = args.pq_compression.parse()?;
    if args.pq_row_group_size <= 0 {
        return Err(Error::invalid_value(
            "pq-row-group-size",
            args.pq_row_group_size.to_string(),
        ));
    }

    let hive = HivePartitionConfig::new()
        .with_partition_by(args.pq_partition_by.iter().map(|c| c.trim().to_string()))
        .with_overwrite_or_ignore(args.pq_overwrite_or_ignore)
        .with_filename_pattern(args.pq_filename_pattern.as_str());

    Ok(ParquetWriteParams::new()
        .with_compression(compression)
        .with_row_group_size(args.pq_row_group_size)
        .with_per_thread_output(args.pq_per_thread_output)
        .with_hive_partition_config(hive))
}

fn csv_params(args: &CsvArgs) -> Result<CsvReadParams> {
    let compression: Compression = args.compression.parse()?;
    let columns = Columns::parse(&args.columns)?;
    let types = Columns::parse(&args.types)?;

    Ok(CsvReadParams::new()
        .with_all_varchar(args.all_varchar)
        .with_allow_quoted_nulls(!args.disable_quoted_nulls)
        .with_auto_detect(!args.disable_autodetect)
        .with_auto_type_candidates(args.auto_type_candidates.clone())
        .with_columns(columns)
        .with_compression(compression)
        .with_dateformat(args.dateformat.as_str())
        .with_decimal_separator(args.decimal_sep.as_str())
        .with_delim(args.delim.as_str())
        .with_escape(args.escape.as_str())
        .with_filename(args.filename)
        .with_force_not_null(args.force_not_null.clone())
        .with_header(args.header)
        .with_hive_partitioning(args.hive_partitioning)
        .with_ignore_errors(args.ignore_errors)
        .with_max_line_size(args.max_line_size)
        .with_names(args.names.clone())
        .with_new_line(args.new_line.as_str())
        .with_normalize_names(args.normalize_names)
        .with_null_padding(args.null_padding)
        .with_nullstr(args.nullstr.clone())
        .with_parallel(args.parallel)
        .with_quote(args.quote.as_str())
        .with_sample_size(args.sample_size)
        .with_skip(args.skip)
        .with_timestampformat(args.timestampformat.as_str())
        .with_types(types)
        .with_union_by_name(args.union_by_name)
        .with_describe(args.describe))
}

fn json_params(args: &JsonArgs) -> Result<JsonReadParams> {
    let compression: Compression = args.compression.parse()?;
    let format: JsonFormat = args.format.parse()?;
    let records: JsonRecords = args.records.parse()?;
    let columns = Columns::parse(&args.columns)?;

    Ok(JsonReadParams::new()
        .with_auto_detect(!args.disable_autodetect)
        .with_columns(columns)
        .with_compression(compression)
        .with_convert_strings_to_integers(args.convert_str_to_int)
        .with_dateformat(args.dateformat.as_str())
        .with_filename(args.filename)
        .with_format(format)
        .with_hive_partitioning(args.hive_partitioning)
        .with_ignore_errors(args.ignore_errors)
        .with_max_depth(args.max_depth)
        .with_max_object_size(args.max_obj_size)
        .with_records(records)
        .with_sample_size(args.sample_size)
        .with_timestampformat(args.timestampformat.as_str())
        .with_union_by_name(args.union_by_name)
        .with_flatten(args.flatten)
        .with_describe(args.describe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_csv_defaults_render_nothing() {
        let cli = parse(&["fileconv", "csv2parquet", "--source", "a.csv", "--dest", "a.parquet"]);
        let Commands::Csv2Parquet(args) = &cli.command else {
            panic!("expected csv2parquet");
        };

        assert_eq!(csv_params(args).unwrap().params(), "");
        assert_eq!(write_params(&cli.parquet).unwrap().params(), "(FORMAT PARQUET)");
    }

    #[test]
    fn test_csv_flags() {
        let cli = parse(&[
            "fileconv",
            "csv2parquet",
            "--source",
            "a.csv",
            "--dest",
            "a.parquet",
            "--header",
            "--delim",
            ";",
            "--columns",
            "id:BIGINT,name:VARCHAR",
            "--nullstr",
            "NA,-",
            "--disable-quoted-nulls",
        ]);
        let Commands::Csv2Parquet(args) = &cli.command else {
            panic!("expected csv2parquet");
        };

        assert_eq!(
            csv_params(args).unwrap().params(),
            ",allow_quoted_nulls = false,auto_detect = false,\
             columns = {'id': 'BIGINT','name': 'VARCHAR'},delim = ';',header = true,\
             nullstr = ['NA','-']"
        );
    }

    #[test]
    fn test_csv_malformed_columns() {
        let cli = parse(&[
            "fileconv",
            "csv2parquet",
            "--source",
            "a.csv",
            "--dest",
            "a.parquet",
            "--columns",
            "id:BIGINT,oops",
        ]);
        let Commands::Csv2Parquet(args) = &cli.command else {
            panic!("expected csv2parquet");
        };

        let err = csv_params(args).unwrap_err();
        assert!(matches!(err, Error::MalformedColumnSpec { .. }));
    }

    #[test]
    fn test_dest_optional_when_describing() {
        assert!(Cli::try_parse_from(["fileconv", "csv2parquet", "--source", "a.csv"]).is_err());

        let cli = parse(&["fileconv", "json2parquet", "--source", "a.json", "--describe"]);
        let Commands::Json2Parquet(args) = &cli.command else {
            panic!("expected json2parquet");
        };
        assert!(args.dest.is_none());
        assert!(json_params(args).unwrap().describe());
    }

    #[test]
    fn test_json_flags() {
        let cli = parse(&[
            "fileconv",
            "json2parquet",
            "--source",
            "a.json",
            "--dest",
            "a.parquet",
            "--format",
            "ndjson",
            "--max-depth",
            "3",
            "--sample-size",
            "-1",
            "--flatten",
        ]);
        let Commands::Json2Parquet(args) = &cli.command else {
            panic!("expected json2parquet");
        };

        let params = json_params(args).unwrap();
        assert!(params.flatten());
        assert_eq!(
            params.params(),
            ",format = 'newline_delimited',maximum_depth = 3,sample_size = -1"
        );
    }

    #[test]
    fn test_json_invalid_format() {
        let cli = parse(&[
            "fileconv",
            "json2parquet",
            "--source",
            "a.json",
            "--dest",
            "a.parquet",
            "--format",
            "yaml",
        ]);
        let Commands::Json2Parquet(args) = &cli.command else {
            panic!("expected json2parquet");
        };

        assert!(matches!(
            json_params(args).unwrap_err(),
            Error::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_parquet_write_flags() {
        let cli = parse(&[
            "fileconv",
            "--pq-compression",
            "zstd",
            "--pq-partition-by",
            "year,month",
            "--pq-overwrite-or-ignore",
            "json2parquet",
            "--source",
            "a.json",
            "--dest",
            "out",
        ]);

        assert_eq!(
            write_params(&cli.parquet).unwrap().params(),
            "(FORMAT PARQUET,COMPRESSION 'zstd',PARTITION_BY (year,month),OVERWRITE_OR_IGNORE 1)"
        );
    }

    #[test]
    fn test_bad_row_group_size() {
        let cli = parse(&[
            "fileconv",
            "csv2parquet",
            "--source",
            "a.csv",
            "--dest",
            "a.parquet",
            "--pq-row-group-size",
            "0",
        ]);
        assert!(write_params(&cli.parquet).is_err());
    }

    #[test]
    fn test_engine_override() {
        let cli = parse(&["fileconv", "--engine", "cli", "--database", "x.duckdb", "version"]);
        let runner = Runner::new(cli);

        let config = runner.engine_config().unwrap();
        assert_eq!(config.engine, crate::config::EngineKind::Cli);
        assert_eq!(config.database, Some(std::path::PathBuf::from("x.duckdb")));
    }
}
