/*!

This is the long-form manual for `genotype_merge` and `msatmerge`.

## Why

When microsatellite panels are re-run on the same individuals, the scoring
output (for example the "MLG, one column per locus" export of Msatallele, or a
Fragman run) lists each run as its own row. The same individual is then spread
over several rows. `msatmerge` puts each individual back together:

* one row per individual, with one genotype per locus,
* a second table counting, for each individual and locus, how many runs gave the
  same genotype (useful to compute error rates downstream),
* a list of the inconsistencies: runs that gave a different genotype for a locus
  that was already scored.

## Merge rule

For each individual and locus, the rows are read in input order:

| current value | cell      | result                                        |
|---------------|-----------|-----------------------------------------------|
| `NA`          | empty     | still `NA`, count 0                           |
| `NA`          | `aaabbb`  | `aaabbb`, count 1                             |
| `aaabbb`      | empty     | unchanged                                     |
| `aaabbb`      | `aaabbb`  | count + 1                                     |
| `aaabbb`      | `cccddd`  | unchanged, reported as an inconsistency       |

The first genotype seen is kept. A later disagreeing run never replaces it, even
if it is seen more often: look at the reported inconsistencies and fix the input
table instead.

## Input formats

The following formats are supported (`--input-type`):
* `tsv` (default) tab-separated text, as written by Msatallele
* `csv` comma-separated text
* `xlsx` Excel workbook, first worksheet unless `--excel-worksheet-name` is given

The first row is the header: the first column is ignored, the following columns
name the loci. Every following row starts with the sample label, then one cell
per locus, either empty or a genotype code of 6 characters (two allele sizes of
3 characters).

```text
Sample	Hg10	Hg13	Hg6.3
data_2017_mplex1_Wexford_12_A01_03.fsa	123456		150150
data_2017_mplex2_Wexford_12_B01_04.fsa	123456	200210	
```

## Sample labels

Labels written by the instruments carry plate, well and run information around
the individual name. They are rewritten by an ordered list of rules (literal
substitutions and regular expressions) before being split on `_` into a
population name and a number. The canonical id is `<population>_<number>`, with
the number padded to 4 digits: `Wexford_0012`.

Rows whose label cannot be resolved are skipped with a warning. So are rows with
fewer cells than loci, and rows with a malformed genotype code.

## Outputs

* genotype table (`-o`): `Sample` and one column per locus, `NA` when never scored
* count table (`-c`): same layout, number of agreeing runs
* inconsistencies (`--conflicts`, optional): sample, locus, kept and rejected genotype
* exports (`--exports`): `genepop`, `popgenreport`, `structure`, `long`

Rows are sorted by sample id, so that runs on the same data give identical files.

## Configuration

The program accepts a configuration file in JSON (`--config`). All the sections
are optional; the command line takes precedence over the file, and the file over
the built-in defaults.

```json
{
  "inputSource": { "provider": "tsv", "filePath": "msatallele_mlg.txt" },
  "outputSettings": {
    "genotypeOutput": "genotypes.txt",
    "countOutput": "counts.txt",
    "exports": ["genepop", "structure"]
  },
  "genotypeFormat": { "codeWidth": 6, "alleleWidth": 3 },
  "labelRules": [
    { "find": "LizPoint", "replace": "LizardPoint" },
    { "find": "_mplex[0-9]*", "replace": "", "regex": true }
  ],
  "sites": [
    { "name": "Wexford", "latitude": 52.316916, "longitude": -6.325791, "code": 2 }
  ]
}
```

Relative paths in the file are resolved against the directory of the file.
*/
